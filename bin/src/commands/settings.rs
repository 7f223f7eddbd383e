use stamp::BuildSettings;
use std::io::Write;

/// Write each recorded setting as `key=value`. Writes nothing when the build
/// recorded no VCS state.
pub fn run(settings: Option<&BuildSettings>, out: &mut impl Write) -> anyhow::Result<()> {
    let Some(settings) = settings else {
        tracing::debug!("no vcs settings recorded at build time");
        return Ok(());
    };
    for (key, value) in settings.iter() {
        writeln!(out, "{key}={value}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::run;
    use stamp::BuildSettings;

    #[test]
    fn key_value_lines() {
        let settings: BuildSettings = [
            ("vcs.revision", "abc123"),
            ("vcs", "git"),
            ("vcs.modified", "true"),
        ]
        .into_iter()
        .collect();

        let mut out = Vec::new();
        run(Some(&settings), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "vcs=git\nvcs.modified=true\nvcs.revision=abc123\n"
        );
    }

    #[test]
    fn nothing_recorded() {
        let mut out = Vec::new();
        run(None, &mut out).unwrap();
        assert!(out.is_empty());
    }
}
