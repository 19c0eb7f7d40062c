use std::{fmt::Display, str::FromStr};

use log::info;
use thiserror::Error;

use crate::{chess::Color, signal::Signal};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClockError {
    #[error("Unknown clock discipline \"{0}\", expected simple, fischer or bronstein")]
    UnknownDiscipline(String),
}

/// Rule governing the time credited back to a side after its move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockDiscipline {
    /// No time is credited.
    #[default]
    Simple,
    /// The side that moved gains the full increment.
    Fischer,
    /// The side that moved gains back the time it used, up to the delay.
    Bronstein,
}

impl FromStr for ClockDiscipline {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "simple" => Ok(ClockDiscipline::Simple),
            "fischer" => Ok(ClockDiscipline::Fischer),
            "bronstein" => Ok(ClockDiscipline::Bronstein),
            _ => Err(ClockError::UnknownDiscipline(s.to_string())),
        }
    }
}

impl Display for ClockDiscipline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClockDiscipline::Simple => write!(f, "simple"),
            ClockDiscipline::Fischer => write!(f, "fischer"),
            ClockDiscipline::Bronstein => write!(f, "bronstein"),
        }
    }
}

/// Token identifying the tick source allowed to advance a running clock.
///
/// A new token is issued each time the clock starts or resumes, and the previous one is revoked
/// when it stops or pauses. A tick carrying a revoked token has no effect.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TickSubscription(u64);

/// What a delivered tick did to the clock.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tick {
    /// The subscription was revoked; nothing changed.
    Stale,
    /// A second was charged to the active side.
    Counted(Color),
    /// A second was charged and the side ran out of time. The clock is stopped.
    Expired(Color),
}

#[derive(Copy, Clone, Debug, Default)]
struct Allotment {
    initial: u32,
    used: u32,
    extra: u32,
    used_at_last_switch: u32,
}

impl Allotment {
    fn total(&self) -> u32 {
        self.initial + self.extra
    }
}

/// A two-sided countdown clock.
///
/// The clock has no timer of its own: whoever hosts it delivers one [`Clock::tick`] per elapsed
/// second, carrying the subscription returned by [`Clock::subscription`].
#[derive(Debug)]
pub struct Clock {
    sides: [Allotment; Color::COUNT],
    discipline: ClockDiscipline,
    increment: u32,
    active: Color,
    running: bool,
    paused: bool,
    subscription: Option<TickSubscription>,
    next_subscription: u64,

    /// Emitted with the side charged for each counted tick.
    pub tick: Signal<Color>,
    /// Emitted with the side that ran out of time.
    pub expired: Signal<Color>,
}

impl Clock {
    /// Creates a stopped clock with white to play.
    ///
    /// # Parameters
    /// * `white_seconds` / `black_seconds` - Initial allotment of each side.
    /// * `discipline` - How time is credited after a move.
    /// * `increment` - Seconds credited by the Fischer discipline, or the delay of the Bronstein
    ///   discipline. Ignored by the simple discipline.
    pub fn new(white_seconds: u32, black_seconds: u32, discipline: ClockDiscipline, increment: u32) -> Self {
        let mut sides = [Allotment::default(); Color::COUNT];
        sides[usize::from(Color::White)].initial = white_seconds;
        sides[usize::from(Color::Black)].initial = black_seconds;

        Self {
            sides,
            discipline,
            increment,
            active: Color::White,
            running: false,
            paused: false,
            subscription: None,
            next_subscription: 0,
            tick: Signal::new(),
            expired: Signal::new(),
        }
    }

    pub fn discipline(&self) -> ClockDiscipline {
        self.discipline
    }

    pub fn increment(&self) -> u32 {
        self.increment
    }

    pub fn active_color(&self) -> Color {
        self.active
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.running && self.paused
    }

    /// The subscription ticks must carry, if the clock is ticking.
    pub fn subscription(&self) -> Option<TickSubscription> {
        self.subscription
    }

    /// Seconds left to `color`. Negative never happens since the clock stops on expiry, but the
    /// signed type keeps the subtraction total.
    pub fn remaining_seconds(&self, color: Color) -> i64 {
        let side = &self.sides[usize::from(color)];
        i64::from(side.total()) - i64::from(side.used)
    }

    pub fn used_seconds(&self, color: Color) -> u32 {
        self.sides[usize::from(color)].used
    }

    fn subscribe(&mut self) {
        self.subscription = Some(TickSubscription(self.next_subscription));
        self.next_subscription += 1;
    }

    /// Starts counting for the active side. No effect if already running.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.paused = false;
        self.subscribe();
    }

    /// Stops the clock and revokes the current subscription.
    pub fn stop(&mut self) {
        self.running = false;
        self.paused = false;
        self.subscription = None;
    }

    pub fn pause(&mut self) {
        if self.running && !self.paused {
            self.paused = true;
            self.subscription = None;
        }
    }

    /// Resumes a paused clock for the same active side.
    pub fn unpause(&mut self) {
        if self.running && self.paused {
            self.paused = false;
            self.subscribe();
        }
    }

    /// Hands the clock over to `color`, crediting the side that just moved according to the
    /// discipline. No effect if `color` is already active.
    pub fn set_active_color(&mut self, color: Color) {
        if color == self.active {
            return;
        }

        let increment = self.increment;
        let mover = &mut self.sides[usize::from(self.active)];
        match self.discipline {
            ClockDiscipline::Simple => {}
            ClockDiscipline::Fischer => mover.extra += increment,
            ClockDiscipline::Bronstein => mover.extra += increment.min(mover.used - mover.used_at_last_switch),
        }

        self.switch_to(color);
    }

    /// Makes `color` the active side without crediting anyone, as when a game starts or a move is
    /// taken back. No effect if `color` is already active.
    pub fn bind_active_color(&mut self, color: Color) {
        if color != self.active {
            self.switch_to(color);
        }
    }

    /// Switches sides, revoking the current subscription. A running clock keeps running for the new
    /// side, and a paused one stays paused without a subscription until it is resumed.
    fn switch_to(&mut self, color: Color) {
        let was_running = self.running;
        let was_paused = self.paused;
        self.stop();

        let side = &mut self.sides[usize::from(self.active)];
        side.used_at_last_switch = side.used;
        self.active = color;

        if was_running {
            self.running = true;
            self.paused = was_paused;
            if !was_paused {
                self.subscribe();
            }
        }
    }

    /// Charges one second to the active side if `subscription` is current.
    pub fn tick(&mut self, subscription: TickSubscription) -> Tick {
        if self.subscription != Some(subscription) {
            return Tick::Stale;
        }

        let color = self.active;
        let side = &mut self.sides[usize::from(color)];
        side.used += 1;
        let expired = side.used >= side.total();

        self.tick.emit(&color);
        if expired {
            info!("{color} ran out of time");
            self.stop();
            self.expired.emit(&color);
            return Tick::Expired(color);
        }

        Tick::Counted(color)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    fn run(clock: &mut Clock, seconds: u32) {
        for _ in 0..seconds {
            let subscription = clock.subscription().expect("the clock is ticking");
            clock.tick(subscription);
        }
    }

    mod discipline_tests {
        use super::*;

        #[test]
        fn test_parse_and_print() {
            for discipline in [ClockDiscipline::Simple, ClockDiscipline::Fischer, ClockDiscipline::Bronstein] {
                assert_eq!(discipline.to_string().parse::<ClockDiscipline>(), Ok(discipline));
            }
            assert_eq!("Fischer".parse::<ClockDiscipline>(), Ok(ClockDiscipline::Fischer));
            assert_eq!(
                "hourglass".parse::<ClockDiscipline>(),
                Err(ClockError::UnknownDiscipline("hourglass".to_string()))
            );
        }
    }

    mod clock_tests {
        use super::*;

        #[test]
        fn test_ticks_charge_active_side() {
            let mut clock = Clock::new(300, 200, ClockDiscipline::Simple, 0);
            clock.start();
            run(&mut clock, 10);
            assert_eq!(clock.remaining_seconds(Color::White), 290);
            assert_eq!(clock.remaining_seconds(Color::Black), 200);

            clock.set_active_color(Color::Black);
            run(&mut clock, 5);
            assert_eq!(clock.remaining_seconds(Color::White), 290);
            assert_eq!(clock.remaining_seconds(Color::Black), 195);
        }

        #[test]
        fn test_stale_subscription_ignored() {
            let mut clock = Clock::new(60, 60, ClockDiscipline::Simple, 0);
            clock.start();
            let first = clock.subscription().expect("the clock is ticking");

            clock.pause();
            assert!(clock.is_paused());
            assert_eq!(clock.subscription(), None);
            assert_eq!(clock.tick(first), Tick::Stale);

            clock.unpause();
            let second = clock.subscription().expect("the clock is ticking");
            assert!(second > first);
            assert_eq!(clock.tick(first), Tick::Stale);
            assert_eq!(clock.tick(second), Tick::Counted(Color::White));

            clock.stop();
            assert_eq!(clock.tick(second), Tick::Stale);
            assert_eq!(clock.remaining_seconds(Color::White), 59);
        }

        #[test]
        fn test_switch_revokes_subscription() {
            let mut clock = Clock::new(60, 60, ClockDiscipline::Simple, 0);
            clock.start();
            let white = clock.subscription().expect("the clock is ticking");
            clock.set_active_color(Color::Black);
            assert_eq!(clock.tick(white), Tick::Stale);
            assert_eq!(clock.remaining_seconds(Color::Black), 60);
        }

        #[test]
        fn test_expiry() {
            let mut clock = Clock::new(3, 60, ClockDiscipline::Simple, 0);
            let expired = Rc::new(RefCell::new(Vec::new()));
            let sink = Rc::clone(&expired);
            clock.expired.connect(move |color| sink.borrow_mut().push(*color));

            clock.start();
            run(&mut clock, 2);
            let subscription = clock.subscription().expect("the clock is ticking");
            assert_eq!(clock.tick(subscription), Tick::Expired(Color::White));

            assert!(!clock.is_running());
            assert_eq!(clock.remaining_seconds(Color::White), 0);
            assert_eq!(*expired.borrow(), vec![Color::White]);
        }

        #[test]
        fn test_fischer_credits_full_increment() {
            let mut clock = Clock::new(60, 60, ClockDiscipline::Fischer, 5);
            clock.start();
            run(&mut clock, 2);
            clock.set_active_color(Color::Black);
            assert_eq!(clock.remaining_seconds(Color::White), 63);

            run(&mut clock, 20);
            clock.set_active_color(Color::White);
            assert_eq!(clock.remaining_seconds(Color::Black), 45);
        }

        #[test]
        fn test_bronstein_credits_used_time_up_to_delay() {
            let mut clock = Clock::new(60, 60, ClockDiscipline::Bronstein, 5);
            clock.start();
            run(&mut clock, 2);
            clock.set_active_color(Color::Black);
            assert_eq!(clock.remaining_seconds(Color::White), 60);

            run(&mut clock, 20);
            clock.set_active_color(Color::White);
            assert_eq!(clock.remaining_seconds(Color::Black), 45);

            run(&mut clock, 3);
            clock.set_active_color(Color::Black);
            assert_eq!(clock.remaining_seconds(Color::White), 60);
        }

        #[test]
        fn test_simple_credits_nothing() {
            let mut clock = Clock::new(60, 60, ClockDiscipline::Simple, 5);
            clock.start();
            run(&mut clock, 2);
            clock.set_active_color(Color::Black);
            assert_eq!(clock.remaining_seconds(Color::White), 58);
        }

        #[test]
        fn test_switch_while_paused_stays_paused() {
            let mut clock = Clock::new(60, 60, ClockDiscipline::Fischer, 5);
            clock.start();
            run(&mut clock, 2);
            clock.pause();
            clock.set_active_color(Color::Black);
            assert!(clock.is_paused());
            assert_eq!(clock.subscription(), None);
            assert_eq!(clock.remaining_seconds(Color::White), 63);

            clock.unpause();
            run(&mut clock, 1);
            assert_eq!(clock.remaining_seconds(Color::Black), 59);
        }

        #[test]
        fn test_bind_credits_nobody() {
            for discipline in [ClockDiscipline::Fischer, ClockDiscipline::Bronstein] {
                let mut clock = Clock::new(60, 60, discipline, 5);
                clock.start();
                run(&mut clock, 2);
                clock.bind_active_color(Color::Black);
                assert_eq!(clock.active_color(), Color::Black);
                assert!(clock.subscription().is_some());
                assert_eq!(clock.remaining_seconds(Color::White), 58);

                clock.bind_active_color(Color::White);
                assert_eq!(clock.remaining_seconds(Color::Black), 60);
            }
        }

        #[test]
        fn test_switch_while_stopped_stays_stopped() {
            let mut clock = Clock::new(60, 60, ClockDiscipline::Fischer, 5);
            clock.set_active_color(Color::Black);
            assert!(!clock.is_running());
            assert_eq!(clock.active_color(), Color::Black);
            assert_eq!(clock.subscription(), None);
        }
    }
}
