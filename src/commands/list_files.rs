use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;

pub fn run<W: Write>(files: &[PathBuf], out: &mut W) -> Result<()> {
    for file in files {
        writeln!(out, "{}", file.display())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_path_per_line() {
        let files = vec![PathBuf::from("/tips/git.md"), PathBuf::from("/tips/vim.md")];
        let mut out = Vec::new();
        run(&files, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "/tips/git.md\n/tips/vim.md\n");
    }
}
