use stamp::BuildInfo;
use std::io::Write;

/// Write `info` as the identity line, or as a JSON object when `json` is set.
pub fn run(info: &BuildInfo, json: bool, out: &mut impl Write) -> anyhow::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, info)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{info}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::run;
    use stamp::{BuildInfo, Sources};

    fn info() -> BuildInfo {
        BuildInfo::load(
            Sources::new("/usr/local/bin/stamp")
                .with_version("v0.4.1")
                .with_build_time("2024-03-10T09:15:00Z")
                .with_branch_name("main")
                .with_platform("linux", "x86_64"),
        )
        .unwrap()
    }

    #[test]
    fn line() {
        let mut out = Vec::new();
        run(&info(), false, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "stamp v0.4.1 linux/x86_64 Commit: <none> BuildDate: 2024-03-10T09:15:00Z BranchName: main Github Repo: https://github.com/can3p/kleiner\n"
        );
    }

    #[test]
    fn json() {
        let mut out = Vec::new();
        run(&info(), true, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["version"], "0.4.1");
        assert_eq!(value["commit"], "<none>");
        assert_eq!(value["branch_name"], "main");
        assert_eq!(value["build_date"], "2024-03-10T09:15:00Z");
    }
}
