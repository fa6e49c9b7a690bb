use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Serializer};
use std::{fs, io::Write, path::Path};

use super::Mapping;

/// Name of the constant the generated module exports.
pub const EXPORT_NAME: &str = "GU_DONG_MAPPING";

/// Render `mapping` as a JS module: `export const GU_DONG_MAPPING = {...};`
/// with 4-space indentation and non-ASCII text left as-is.
pub fn render_mapping(mapping: &Mapping) -> Result<String> {
    let mut out = format!("export const {} = ", EXPORT_NAME).into_bytes();
    {
        let mut ser = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
        mapping
            .serialize(&mut ser)
            .context("serializing mapping to JSON")?;
    }
    out.extend_from_slice(b";\n");
    String::from_utf8(out).context("rendered mapping is not UTF-8")
}

/// Overwrite `path` with the rendered mapping, creating parent directories.
///
/// Writes to a hidden sibling first and renames it over `path`, so a failed
/// run never leaves a half-written module behind.
pub fn write_mapping<P: AsRef<Path>>(path: P, mapping: &Mapping) -> Result<()> {
    let path = path.as_ref();
    let rendered = render_mapping(mapping)?;

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).with_context(|| format!("creating output directory {:?}", dir))?;

    let file_name = path
        .file_name()
        .with_context(|| format!("output path {:?} has no file name", path))?
        .to_string_lossy();
    let tmp_path = dir.join(format!(".{}.tmp", file_name));

    let mut tmp =
        fs::File::create(&tmp_path).with_context(|| format!("creating {:?}", tmp_path))?;
    tmp.write_all(rendered.as_bytes())
        .with_context(|| format!("writing {:?}", tmp_path))?;
    tmp.sync_all().with_context(|| format!("flushing {:?}", tmp_path))?;
    drop(tmp);

    fs::rename(&tmp_path, path)
        .with_context(|| format!("renaming {:?} -> {:?}", tmp_path, path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::Neighborhood;
    use tempfile::tempdir;

    fn sample() -> Mapping {
        let mut m = Mapping::new();
        m.insert(
            "강남구".to_string(),
            vec![Neighborhood {
                code: "1168064000".into(),
                name: "역삼1동".into(),
            }],
        );
        m
    }

    #[test]
    fn renders_js_module() -> Result<()> {
        let expected = r#"export const GU_DONG_MAPPING = {
    "강남구": [
        {
            "code": "1168064000",
            "name": "역삼1동"
        }
    ]
};
"#;
        assert_eq!(render_mapping(&sample())?, expected);
        Ok(())
    }

    #[test]
    fn empty_mapping_renders_empty_object() -> Result<()> {
        assert_eq!(
            render_mapping(&Mapping::new())?,
            "export const GU_DONG_MAPPING = {};\n"
        );
        Ok(())
    }

    #[test]
    fn overwrites_existing_output() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested/data/mapping.js");
        fs::create_dir_all(path.parent().unwrap())?;
        fs::write(&path, "stale contents that are much longer than the new module")?;

        write_mapping(&path, &Mapping::new())?;
        assert_eq!(
            fs::read_to_string(&path)?,
            "export const GU_DONG_MAPPING = {};\n"
        );
        assert!(!dir.path().join("nested/data/.mapping.js.tmp").exists());
        Ok(())
    }
}
