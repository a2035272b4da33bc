//! The instrumented profiler.
//!
//! A [`Profiler`] owns a cycle-frequency estimate, a preallocated record
//! ring, and an active flag. While active, [`Profiler::begin`],
//! [`Profiler::end`] and the scoped [`Profiler::section`] guard append
//! begin/end records from any thread; while inactive they are no-ops.
//! [`Profiler::stop_and_collect`] replays the ring into a [`ProfileReport`]
//! call tree.
//!
//! Most code uses the process-wide instance through the macros:
//!
//! ```
//! use arcspan::profile_section;
//! use arcspan::profiler::Profiler;
//!
//! Profiler::global().start();
//! {
//!     let _section = profile_section!("outer-work");
//!     // traced work, released on every exit path
//! }
//! if let Some(report) = Profiler::global().stop_and_collect(None) {
//!     report.print_tree();
//! }
//! ```

pub mod clock;
mod record;
mod ring;
mod tree;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

pub use record::{ProfileRecord, RecordKind, Site};
pub use ring::DEFAULT_RECORD_CAPACITY;
pub use tree::{ProfileNode, ProfileReport};

use ring::RecordRing;

/// Calibration window for the global profiler's frequency estimate.
const CALIBRATION_MILLIS: u64 = 100;

/// Site attributed to the synthetic start/stop records; reconstruction
/// reports it as `ROOT`.
const ROOT_SITE: Site = Site::new("arcspan", 0, "profiler", None);

pub struct Profiler {
    cpu_freq: u64,
    ring: RecordRing,
    active: AtomicBool,
}

impl Profiler {
    /// A profiler with the default ring capacity and a freshly calibrated
    /// frequency estimate. Calibration blocks for about 100 ms.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(
            DEFAULT_RECORD_CAPACITY,
            clock::estimate_cpu_frequency(CALIBRATION_MILLIS),
        )
    }

    /// A profiler with an explicit ring capacity and frequency. The ring
    /// never grows; size it for the worst-case section count.
    #[must_use]
    pub fn with_capacity(capacity: usize, cpu_freq: u64) -> Self {
        Self {
            cpu_freq,
            ring: RecordRing::with_capacity(capacity),
            active: AtomicBool::new(false),
        }
    }

    /// The process-wide instance, created (and calibrated) on first use.
    pub fn global() -> &'static Profiler {
        static GLOBAL: OnceLock<Profiler> = OnceLock::new();
        GLOBAL.get_or_init(Profiler::new)
    }

    /// Ticks per second of the cycle counter, as estimated at construction.
    #[must_use]
    pub fn cpu_freq(&self) -> u64 {
        self.cpu_freq
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Record capacity of the ring.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Arms the profiler. On the inactive-to-active transition the ring is
    /// rewound and a start record is pushed; starting an active profiler
    /// does nothing.
    pub fn start(&self) {
        if self
            .active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            self.ring.reset();
            self.ring.push(RecordKind::ProfilerStart, ROOT_SITE);
        }
    }

    /// Disarms the profiler and reconstructs the report, or returns `None`
    /// when it was not active. The caller must have quiesced all section
    /// writers (join worker threads first); `path_trim` strips a prefix
    /// from recorded file paths.
    pub fn stop_and_collect(&self, path_trim: Option<&str>) -> Option<ProfileReport> {
        if self
            .active
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return None;
        }
        self.ring.push(RecordKind::ProfilerEnd, ROOT_SITE);
        let records = self.ring.snapshot();
        Some(tree::reconstruct(&records, self.cpu_freq, path_trim))
    }

    /// Pushes a section-begin record for `site`. No-op while inactive.
    /// A matching [`Profiler::end`] must pass the *same* site; the scoped
    /// [`Profiler::section`] guard does this automatically.
    pub fn begin(&self, site: Site) {
        if self.is_active() {
            self.ring.push(RecordKind::SectionBegin, site);
        }
    }

    /// Pushes a section-end record for `site`. No-op while inactive.
    pub fn end(&self, site: Site) {
        if self.is_active() {
            self.ring.push(RecordKind::SectionEnd, site);
        }
    }

    /// Opens a section and returns a guard that closes it — with the same
    /// site — on every exit path, unwinds included.
    #[must_use]
    pub fn section(&self, site: Site) -> SectionGuard<'_> {
        self.begin(site);
        SectionGuard {
            profiler: self,
            site,
        }
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped section handle returned by [`Profiler::section`].
pub struct SectionGuard<'a> {
    profiler: &'a Profiler,
    site: Site,
}

impl Drop for SectionGuard<'_> {
    fn drop(&mut self) {
        self.profiler.end(self.site);
    }
}

/// Expands to the path-qualified name of the enclosing function.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn anchor() {}
        fn name_of<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        let full = name_of(anchor);
        full.strip_suffix("::anchor").unwrap_or(full)
    }};
}

/// Captures the call site — file, line, enclosing function, and an optional
/// section name — as a [`profiler::Site`](crate::profiler::Site).
#[macro_export]
macro_rules! profile_site {
    () => {
        $crate::profiler::Site::new(
            ::core::file!(),
            ::core::line!(),
            $crate::function_name!(),
            ::core::option::Option::None,
        )
    };
    ($section:expr) => {
        $crate::profiler::Site::new(
            ::core::file!(),
            ::core::line!(),
            $crate::function_name!(),
            ::core::option::Option::Some($section),
        )
    };
}

/// Opens a scoped section on the global profiler; the section ends when the
/// returned guard drops.
#[macro_export]
macro_rules! profile_section {
    () => {
        $crate::profiler::Profiler::global().section($crate::profile_site!())
    };
    ($section:expr) => {
        $crate::profiler::Profiler::global().section($crate::profile_site!($section))
    };
}
