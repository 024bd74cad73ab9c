/// Writes a line to `$out` if the user asked for verbose output. A dry run is always verbose,
/// since listing is all it does. Evaluates to an `io::Result<()>`.
#[macro_export]
macro_rules! verbose {
    ($opts:expr, $out:expr, $($arg:tt)*) => {
        if $opts.verbose || $opts.noop {
            use ::std::io::Write as _;
            writeln!($out, $($arg)*)
        } else {
            ::std::io::Result::Ok(())
        }
    };
}
