use std::path::PathBuf;

// For argp::FromArgs
pub fn path_buf(value: &str) -> Result<PathBuf, String> {
    if value.trim().is_empty() {
        return Err("path must not be empty".to_string());
    }
    Ok(PathBuf::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_buf() {
        assert_eq!(path_buf("notes/v1.txt"), Ok(PathBuf::from("notes/v1.txt")));
        assert!(path_buf("  ").is_err());
    }
}
