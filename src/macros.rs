/// Compile a regex literal once and hand back a `&'static Regex`.
#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Print a trace line to stderr when `SSFCONV_DEBUG` is set.
#[macro_export]
macro_rules! trace {
    ($stage:literal, $($arg:tt)*) => {
        if $crate::debug_enabled() {
            eprintln!(concat!("[", $stage, "] {}"), format_args!($($arg)*));
        }
    };
}
