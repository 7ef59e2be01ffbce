/// Loop timing for the two game clocks
///
/// The simulation (physics, ground sensing, movement) runs on a fixed
/// 60 Hz clock; presentation work (facing, animation parameters) runs
/// once per frame at whatever rate the host achieves.
use std::time::{Duration, Instant};

/// Fixed simulation rate (60 ticks per second)
pub const SIMULATION_TIMESTEP: f32 = 1.0 / 60.0;
const SIMULATION_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum simulation ticks per frame to prevent spiral of death
const MAX_SIMULATION_TICKS: u32 = 5;

/// Game loop timing state
pub struct GameLoop {
    /// Accumulated time for fixed-rate simulation ticks
    accumulator: Duration,

    /// Time of last frame
    last_frame_time: Instant,

    /// Time when the loop started
    start_time: Instant,

    /// Whether the simulation is paused
    paused: bool,

    /// Current frame number
    frame_count: u64,

    /// Total simulation ticks executed
    tick_count: u64,

    /// Delta time for presentation (time since last frame)
    presentation_delta: f32,
}

impl GameLoop {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: now,
            start_time: now,
            paused: false,
            frame_count: 0,
            tick_count: 0,
            presentation_delta: 0.0,
        }
    }

    /// Begin a new frame, returns the number of simulation ticks to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        self.presentation_delta = frame_time.as_secs_f32();

        // Paused: presentation keeps running, simulation time doesn't accumulate
        if self.paused {
            return 0;
        }

        self.accumulator += frame_time;

        let mut ticks = 0;
        while self.accumulator >= SIMULATION_TIMESTEP_DURATION && ticks < MAX_SIMULATION_TICKS {
            self.accumulator -= SIMULATION_TIMESTEP_DURATION;
            ticks += 1;
        }

        self.tick_count += ticks as u64;
        ticks
    }

    /// Get the fixed simulation timestep (in seconds)
    pub fn simulation_timestep(&self) -> f32 {
        SIMULATION_TIMESTEP
    }

    /// Get the delta time since the last frame (in seconds)
    pub fn presentation_delta(&self) -> f32 {
        self.presentation_delta
    }

    /// Get the interpolation alpha between simulation ticks
    ///
    /// Alpha = accumulated_time / fixed_timestep; use it to interpolate
    /// presentation positions between ticks.
    pub fn alpha(&self) -> f32 {
        self.accumulator.as_secs_f32() / SIMULATION_TIMESTEP
    }

    /// Get total elapsed time since the loop started
    pub fn elapsed(&self) -> Duration {
        Instant::now().duration_since(self.start_time)
    }

    /// Get total elapsed time in seconds
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed().as_secs_f32()
    }

    /// Get total number of frames
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get total number of simulation ticks executed
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Check if the simulation is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause the simulation
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Simulation paused");
        }
    }

    /// Resume the simulation
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent a tick burst
            self.accumulator = Duration::ZERO;
            log::info!("Simulation resumed");
        }
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_game_loop_creation() {
        let game_loop = GameLoop::new();
        assert_eq!(game_loop.frame_count(), 0);
        assert_eq!(game_loop.tick_count(), 0);
        assert!(!game_loop.is_paused());
    }

    #[test]
    fn test_simulation_timestep() {
        let game_loop = GameLoop::new();
        assert!((game_loop.simulation_timestep() - 1.0 / 60.0).abs() < 0.0001);
    }

    #[test]
    fn test_pause_resume() {
        let mut game_loop = GameLoop::new();
        game_loop.pause();
        assert!(game_loop.is_paused());
        game_loop.resume();
        assert!(!game_loop.is_paused());
    }

    #[test]
    fn test_paused_no_ticks() {
        let mut game_loop = GameLoop::new();
        game_loop.pause();

        thread::sleep(Duration::from_millis(50));

        let ticks = game_loop.begin_frame();
        assert_eq!(ticks, 0);
    }

    #[test]
    fn test_frame_counting() {
        let mut game_loop = GameLoop::new();
        game_loop.begin_frame();
        game_loop.begin_frame();
        assert_eq!(game_loop.frame_count(), 2);
    }

    #[test]
    fn test_alpha_range() {
        let game_loop = GameLoop::new();
        let alpha = game_loop.alpha();
        assert!((0.0..=1.0).contains(&alpha));
    }

    #[test]
    fn test_tick_accumulation() {
        let mut game_loop = GameLoop::new();

        thread::sleep(SIMULATION_TIMESTEP_DURATION);

        let ticks = game_loop.begin_frame();
        assert!(ticks <= MAX_SIMULATION_TICKS);
    }

    #[test]
    fn test_max_ticks_limit() {
        let mut game_loop = GameLoop::new();

        // A very long frame (300ms) would allow 18 ticks unclamped
        thread::sleep(Duration::from_millis(300));

        let ticks = game_loop.begin_frame();
        assert!(ticks <= MAX_SIMULATION_TICKS);
    }
}
