use tracing_subscriber::{EnvFilter, filter::ParseError, fmt, prelude::*};

/// Directives used when `RUST_LOG` is unset.
///
/// Other crates stay at `warn`. At `info` the engine reports each finalized
/// document and `docs_meta` warns about data streams it skips. Title and
/// template edits in `docs_content` are logged at `debug`.
pub const DEFAULT_FILTER: &str = "warn,docs_engine=info,docs_content=info,docs_meta=info";

/// Initialize a tracing subscriber for documentation runs.
///
/// Logs go to stderr so a finalized README can be piped from stdout.
/// `RUST_LOG` overrides [`DEFAULT_FILTER`]; `RUST_LOG=docs_content=debug`
/// shows every inserted or removed template and `docs_meta=warn` hides the
/// package loading chatter. Fails if a global subscriber is already
/// installed or `RUST_LOG` does not parse.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_with(std::env::var("RUST_LOG").ok().as_deref())
}

/// Like [`init`], with explicit directives in place of `RUST_LOG`.
pub fn init_with(directives: Option<&str>) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .compact();

    tracing_subscriber::registry()
        .with(filter(directives)?)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

fn filter(directives: Option<&str>) -> Result<EnvFilter, ParseError> {
    match directives.map(str::trim) {
        Some(directives) if !directives.is_empty() => EnvFilter::try_new(directives),
        _ => EnvFilter::try_new(DEFAULT_FILTER),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_names_workspace_crates() {
        let rendered = filter(None).unwrap().to_string();
        for target in ["docs_engine=info", "docs_content=info", "docs_meta=info"] {
            assert!(rendered.contains(target), "{rendered}");
        }
    }

    #[test]
    fn test_blank_directives_fall_back_to_default() {
        assert_eq!(filter(Some("  ")).unwrap().to_string(), filter(None).unwrap().to_string());
    }

    #[test]
    fn test_explicit_directives() {
        let rendered = filter(Some("docs_meta=warn")).unwrap().to_string();
        assert!(rendered.contains("docs_meta=warn"));
        assert!(!rendered.contains("docs_content"));
        assert!(filter(Some("docs_meta=loud")).is_err());
    }

    #[test]
    fn test_second_init_fails() {
        // Only one global subscriber per process; the first call may race with other tests.
        let _ = init_with(None);
        assert!(init_with(None).is_err());
    }
}
