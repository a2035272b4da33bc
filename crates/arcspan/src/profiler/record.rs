//! Record types shared by the ring and the reconstruction pass.

use core::fmt;
use std::sync::atomic::{AtomicI32, Ordering};

/// What a record marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum RecordKind {
    ProfilerStart,
    ProfilerEnd,
    SectionBegin,
    SectionEnd,
}

/// Call-site identity: where in the source a section was opened.
///
/// Two sections at the same file/line/function but with different section
/// names are distinct. The string form, and the identity used during
/// reconstruction, is `file|line|function` with `|section` appended when a
/// section name is present. Build one with [`crate::profile_site!`], which
/// captures file, line and enclosing function at its expansion site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Site {
    pub file: &'static str,
    pub line: u32,
    pub function: &'static str,
    pub section: Option<&'static str>,
}

impl Site {
    #[must_use]
    pub const fn new(
        file: &'static str,
        line: u32,
        function: &'static str,
        section: Option<&'static str>,
    ) -> Self {
        Self {
            file,
            line,
            function,
            section,
        }
    }

    /// The identity string, with `trim` stripped off the front of the file
    /// path when it matches.
    #[must_use]
    pub fn id_with_trim(&self, trim: Option<&str>) -> String {
        let file = match trim {
            Some(prefix) => self.file.strip_prefix(prefix).unwrap_or(self.file),
            None => self.file,
        };
        match self.section {
            Some(section) => format!("{file}|{}|{}|{section}", self.line, self.function),
            None => format!("{file}|{}|{}", self.line, self.function),
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id_with_trim(None))
    }
}

/// One fixed-layout entry in the record ring. Written exactly once into its
/// reserved slot and never mutated afterwards.
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct ProfileRecord {
    pub kind: RecordKind,
    pub thread_id: i32,
    pub cycles: u64,
    pub site: Site,
}

static NEXT_THREAD_ID: AtomicI32 = AtomicI32::new(1);

thread_local! {
    static THREAD_ID: i32 = NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed);
}

/// A small dense id for the calling thread, assigned on first use.
pub(crate) fn current_thread_id() -> i32 {
    THREAD_ID.with(|id| *id)
}
