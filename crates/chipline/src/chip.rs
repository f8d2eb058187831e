use core::{fmt, time::Duration};
use rand::{Rng, rng};
use std::thread;

/// Category of a [`Chip`]. The discriminant doubles as the soldering weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ChipKind {
    Small = 1,
    Medium = 2,
    Big = 3,
}

impl ChipKind {
    /// Every kind, smallest first.
    pub const ALL: [Self; 3] = [Self::Small, Self::Medium, Self::Big];

    /// How many soldering units a chip of this kind takes.
    pub const fn weight(self) -> u32 {
        self as u32
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Big => "big",
        }
    }
}

impl fmt::Display for ChipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable unit of work.
///
/// Chips are created by a [`Source`], pushed onto storage by the generator
/// and consumed exactly once by [`Chip::solder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chip {
    kind: ChipKind,
}

impl Chip {
    pub const fn new(kind: ChipKind) -> Self {
        Self { kind }
    }

    /// Makes a chip of a uniformly random kind.
    pub fn random() -> Self {
        RandomChips.make()
    }

    pub const fn kind(&self) -> ChipKind {
        self.kind
    }

    /// Time spent soldering this chip when one weight unit takes `unit`.
    pub fn soldering_time(&self, unit: Duration) -> Duration {
        unit.saturating_mul(self.kind.weight())
    }

    /// Solders the chip, blocking the calling thread for
    /// [`soldering_time`](Self::soldering_time). A zero `unit` returns
    /// immediately.
    pub fn solder(self, unit: Duration) {
        let took = self.soldering_time(unit);
        if !took.is_zero() {
            thread::sleep(took);
        }
        #[cfg(feature = "tracing")]
        tracing::info!(kind = %self.kind, took_ms = took.as_millis() as u64, "soldered {self}");
    }
}

impl fmt::Display for Chip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chip.{}", self.kind)
    }
}

/// A trait for things that make work items.
///
/// This abstraction lets the generator run off a random factory in
/// production and a scripted one in tests. Any `FnMut() -> T` closure is a
/// source.
///
/// # Example
/// ```
/// use chipline::{Chip, ChipKind, Source};
///
/// struct AlwaysBig;
/// impl Source<Chip> for AlwaysBig {
///     fn make(&mut self) -> Chip {
///         Chip::new(ChipKind::Big)
///     }
/// }
///
/// assert_eq!(AlwaysBig.make().kind(), ChipKind::Big);
///
/// let mut next = 0;
/// let mut counter = move || {
///     next += 1;
///     next
/// };
/// assert_eq!(counter.make(), 1);
/// assert_eq!(counter.make(), 2);
/// ```
pub trait Source<T> {
    /// Makes the next item.
    fn make(&mut self) -> T;
}

impl<T, F> Source<T> for F
where
    F: FnMut() -> T,
{
    fn make(&mut self) -> T {
        self()
    }
}

/// A [`Source`] of chips with kinds drawn from the thread-local RNG.
///
/// This type does not store the RNG; it reaches for the calling thread's
/// generator on each call, so it is `Send`, `Sync` and free to copy.
#[derive(Default, Clone, Copy, Debug)]
pub struct RandomChips;

impl Source<Chip> for RandomChips {
    fn make(&mut self) -> Chip {
        let index = rng().random_range(0..ChipKind::ALL.len());
        Chip::new(ChipKind::ALL[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn weights_follow_kind_order() {
        assert_eq!(ChipKind::Small.weight(), 1);
        assert_eq!(ChipKind::Medium.weight(), 2);
        assert_eq!(ChipKind::Big.weight(), 3);
        assert!(ChipKind::Small < ChipKind::Big);
    }

    #[test]
    fn displays_like_a_label() {
        assert_eq!(Chip::new(ChipKind::Medium).to_string(), "chip.medium");
        assert_eq!(ChipKind::Big.to_string(), "big");
    }

    #[test]
    fn soldering_time_scales_with_weight() {
        let unit = Duration::from_millis(10);
        assert_eq!(
            Chip::new(ChipKind::Small).soldering_time(unit),
            Duration::from_millis(10)
        );
        assert_eq!(
            Chip::new(ChipKind::Big).soldering_time(unit),
            Duration::from_millis(30)
        );
        assert_eq!(
            Chip::new(ChipKind::Big).soldering_time(Duration::MAX),
            Duration::MAX
        );
    }

    #[test]
    fn zero_unit_solders_instantly() {
        let started = std::time::Instant::now();
        Chip::new(ChipKind::Big).solder(Duration::ZERO);
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn random_chips_cover_every_kind() {
        let mut source = RandomChips;
        let seen: HashSet<_> = (0..1_000).map(|_| source.make().kind()).collect();
        assert_eq!(seen.len(), ChipKind::ALL.len());
        assert!(ChipKind::ALL.contains(&Chip::random().kind()));
    }
}
