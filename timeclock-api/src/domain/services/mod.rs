mod clock;

pub use clock::ClockService;
