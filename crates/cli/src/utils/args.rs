use std::ffi::OsString;

/// Long flags that may also be spelled with a single dash, Go style
const LONG_FLAGS: &[&str] = &["pkg", "rootPkg", "tags", "no-tests", "dry-run", "json"];

/// Rewrite `-pkg foo` and `-rootPkg=bar` into their `--` forms.
///
/// The program name and anything after a bare `--` are left untouched.
pub fn normalize_go_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;

    for (idx, arg) in args.into_iter().enumerate() {
        if idx == 0 || passthrough {
            out.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }
        match arg.to_str().and_then(single_dash_long_flag) {
            Some(rewritten) => out.push(rewritten.into()),
            None => out.push(arg),
        }
    }
    out
}

fn single_dash_long_flag(arg: &str) -> Option<String> {
    let body = arg.strip_prefix('-')?;
    if body.starts_with('-') {
        return None;
    }
    let name = body.split('=').next().unwrap_or(body);
    LONG_FLAGS.contains(&name).then(|| format!("-{arg}"))
}
