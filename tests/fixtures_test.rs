use std::fs;
use twine_xml::read_document;

#[test]
fn test_valid_fixtures() -> Result<(), Box<dyn std::error::Error>> {
    let valid_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/valid");
    for entry in fs::read_dir(valid_dir)? {
        let entry = entry?;
        let path = entry.path();
        let content = fs::read_to_string(&path)?;
        if let Err(err) = read_document(&content) {
            return Err(std::io::Error::other(format!(
                "Failed to parse valid file {path:?}: {err}"
            ))
            .into());
        }
    }
    Ok(())
}

#[test]
fn test_invalid_fixtures() -> Result<(), Box<dyn std::error::Error>> {
    let invalid_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/invalid");
    for entry in fs::read_dir(invalid_dir)? {
        let entry = entry?;
        let path = entry.path();
        let content = fs::read_to_string(&path)?;
        if read_document(&content).is_ok() {
            return Err(std::io::Error::other(format!(
                "Should fail to parse invalid file: {path:?}"
            ))
            .into());
        }
    }
    Ok(())
}

#[test]
fn test_valid_fixtures_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let valid_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/valid");
    for entry in fs::read_dir(valid_dir)? {
        let entry = entry?;
        let path = entry.path();
        let content = fs::read_to_string(&path)?;
        let root = read_document(&content)
            .map_err(|err| std::io::Error::other(format!("{path:?}: {err}")))?;
        let written = twine_xml::write_document(&root, None)
            .map_err(|err| std::io::Error::other(format!("{path:?}: {err}")))?;
        let reparsed = read_document(&written)
            .map_err(|err| std::io::Error::other(format!("{path:?} after write: {err}")))?;
        if reparsed != root {
            return Err(std::io::Error::other(format!(
                "Round trip changed the tree for {path:?}"
            ))
            .into());
        }
    }
    Ok(())
}
