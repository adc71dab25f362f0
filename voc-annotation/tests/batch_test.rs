use anyhow::Result;
use std::fs;
use voc_annotation::{
    collect_annotation_files, process_file, process_files, AnnotationNormalizer, NormalizeConfig,
};

const ANNOTATION: &str = "<?xml version='1.0' encoding='UTF-8'?>
<annotation>
\t<source>
\t\t<database>Unknown</database>
\t</source>
\t<object>
\t\t<name>person</name>
\t\t<occluded>1</occluded>
\t\t<bndbox>
\t\t\t<xmax>1024</xmax>
\t\t\t<ymax>240</ymax>
\t\t\t<ymin>12</ymin>
\t\t\t<xmin>600</xmin>
\t\t</bndbox>
\t</object>
</annotation>
";

const EXPECTED: &str = "<annotation>
\t<source>
\t\t<database>Unknown</database>
\t</source>
\t<object>
\t\t<name>person</name>
<bndbox>
\t<xmin>600</xmin>
\t<ymin>12</ymin>
\t<xmax>639</xmax>
\t<ymax>240</ymax>
</bndbox>
\t</object>
</annotation>
";

#[test]
fn collect_xml_files() -> Result<()> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("b.xml"), ANNOTATION)?;
    fs::write(dir.path().join("a.xml"), ANNOTATION)?;
    fs::write(dir.path().join("a.jpg"), "")?;
    fs::create_dir(dir.path().join("nested.xml"))?;
    fs::write(dir.path().join("nested.xml").join("c.xml"), ANNOTATION)?;

    let extra = dir.path().join("nested.xml").join("c.xml");
    let files = collect_annotation_files(&[dir.path().to_owned(), extra.clone()])?;

    assert_eq!(
        files,
        vec![dir.path().join("a.xml"), dir.path().join("b.xml"), extra]
    );
    Ok(())
}

#[test]
fn normalize_files_in_place() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let normalizer = AnnotationNormalizer::new(&NormalizeConfig::default())?;
    let path = dir.path().join("0001.xml");
    fs::write(&path, ANNOTATION)?;

    let document = process_file(&normalizer, &path, true)?;
    assert_eq!(document.text, EXPECTED);
    assert_eq!(fs::read_to_string(&path)?, ANNOTATION);

    let document = process_file(&normalizer, &path, false)?;
    assert!(document.modified);
    assert_eq!(fs::read_to_string(&path)?, EXPECTED);

    let document = process_file(&normalizer, &path, false)?;
    assert!(!document.modified);
    assert_eq!(fs::read_to_string(&path)?, EXPECTED);
    Ok(())
}

#[test]
fn failures_do_not_stop_the_batch() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let normalizer = AnnotationNormalizer::new(&NormalizeConfig::default())?;

    let good = dir.path().join("good.xml");
    let invalid = dir.path().join("invalid.xml");
    let missing = dir.path().join("missing.xml");
    let normalized = dir.path().join("normalized.xml");
    fs::write(&good, ANNOTATION)?;
    fs::write(&invalid, [0xff, 0xfe, 0x00, 0x3c])?;
    fs::write(&normalized, EXPECTED)?;

    let report = process_files(&normalizer, &[&invalid, &missing, &good, &normalized], false);

    assert!(!report.is_success());
    assert_eq!(report.processed, 2);
    assert_eq!(report.modified, 1);
    assert_eq!(report.bndboxes, 2);
    assert_eq!(
        report
            .failures
            .iter()
            .map(|(path, _)| path.clone())
            .collect::<Vec<_>>(),
        vec![invalid, missing]
    );
    assert_eq!(fs::read_to_string(&good)?, EXPECTED);
    Ok(())
}
