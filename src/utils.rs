use std::path::{Path, PathBuf};

/// Keeps at most `max_len` leading characters (code points) of `s`.
pub fn substr_up_to_len(s: &str, max_len: usize) -> String {
    match s.char_indices().nth(max_len) {
        Some((end, _)) => s[..end].to_owned(),
        None => s.to_owned(),
    }
}

/// `dir/report.docx` becomes `dir/report_<lang>.docx`.
pub fn suffixed_output_path(input: &Path, lang: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = input
        .extension()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "docx".to_owned());
    let file_name = format!("{}_{}.{}", stem, lang, ext);
    input.with_file_name(file_name)
}
