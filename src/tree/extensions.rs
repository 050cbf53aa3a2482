/// File type families used by the file-type color mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// Images: jpg, png, gif, bmp, svg, webp, ico, heic
    Image,
    /// Video: mp4, mkv, avi, mov, wmv, m2ts
    Video,
    /// Audio: mp3, flac, wav, aac, ogg
    Audio,
    /// Documents: pdf, office formats, txt, csv, md
    Document,
    /// Archives: zip, tar, gz, bz2, 7z, rar, xz
    Archive,
    /// Source code and markup
    Code,
    /// Structured config and data: json, xml, yaml
    Config,
    /// Databases: db, sqlite, sql
    Database,
    /// Disk and VM images: iso, img, vmdk, qcow2
    DiskImage,
    /// Log files
    Log,
    /// Backups: bak, old, hbk
    Backup,
    /// Unknown / no extension
    Other,
}

/// Lowercased text after the last dot of a file name. Empty when there is no dot.
///
/// A leading dot counts, so `.bashrc` has the extension `bashrc`.
pub fn extension_of(name: &str) -> String {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default()
}

/// Classify a file extension into a kind.
pub fn categorize_extension(ext: &str) -> FileKind {
    match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" | "png" | "gif" | "bmp" | "svg" | "webp" | "ico" | "tiff" | "tif"
        | "heic" | "raw" | "cr2" | "nef" => FileKind::Image,

        "mp4" | "mkv" | "avi" | "mov" | "wmv" | "flv" | "webm" | "m4v" | "mpg" | "mpeg"
        | "m2ts" | "3gp" => FileKind::Video,

        "mp3" | "flac" | "wav" | "aac" | "ogg" | "wma" | "m4a" | "opus" => FileKind::Audio,

        "pdf" | "doc" | "docx" | "xls" | "xlsx" | "ppt" | "pptx" | "txt" | "csv" | "md"
        | "rtf" | "odt" => FileKind::Document,

        "zip" | "tar" | "gz" | "bz2" | "7z" | "rar" | "xz" | "zst" | "tgz" => FileKind::Archive,

        "py" | "js" | "ts" | "html" | "css" | "java" | "go" | "rs" | "c" | "cpp" | "h"
        | "sh" | "rb" | "php" => FileKind::Code,

        "json" | "xml" | "yaml" | "yml" | "toml" | "ini" | "conf" | "cfg" => FileKind::Config,

        "db" | "sqlite" | "sqlite3" | "sql" => FileKind::Database,

        "iso" | "img" | "vmdk" | "qcow2" | "vhd" | "vhdx" | "vdi" => FileKind::DiskImage,

        "log" => FileKind::Log,

        "bak" | "old" | "backup" | "hbk" => FileKind::Backup,

        _ => FileKind::Other,
    }
}
