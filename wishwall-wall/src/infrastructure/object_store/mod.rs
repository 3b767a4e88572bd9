pub mod adapter;
pub mod filesystem;
pub mod s3;

pub use adapter::build_object_store;
pub use filesystem::FilesystemObjectStore;
pub use s3::S3ObjectStore;

/// 对象键里的文件名只保留字母数字与 `.` `-` `_`，其余字符替换为 `-`
///
/// 两个后端共用同一个键契约 `<前缀>/<毫秒时间戳>_<文件名>`，
/// 文件名里的路径分隔符也在这里挡掉，对象键不会逃出前缀目录。
pub(crate) fn sanitize_file_name(file_name: &str) -> String {
    let trimmed = file_name.trim();
    let mut sanitized = String::with_capacity(trimmed.len());
    for ch in trimmed.chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_') {
            sanitized.push(ch);
        } else {
            sanitized.push('-');
        }
    }
    sanitized.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_keeps_extension_and_replaces_odd_chars() {
        assert_eq!(sanitize_file_name("party photo.png"), "party-photo.png");
        assert_eq!(sanitize_file_name(" cake!.jpeg "), "cake-.jpeg");
        assert_eq!(sanitize_file_name("ok_file-1.gif"), "ok_file-1.gif");
    }

    #[test]
    fn sanitize_neutralizes_path_separators() {
        assert_eq!(
            sanitize_file_name("../escape attempt.png"),
            "..-escape-attempt.png"
        );
        assert_eq!(sanitize_file_name("a/b\\c.png"), "a-b-c.png");
    }
}
