use filekind_core::{Capability, Classification, Kind};
use std::path::Path;

/// Icon shown next to a kind in human-readable output.
pub fn kind_icon(kind: &Kind) -> &'static str {
    match kind.as_str() {
        "missing_path" => "❓",
        "folder" => "📂",
        "python_package" => "🐍",
        "c_project" => "🔧",
        "website_folder" => "🌐",
        "python_file" => "🐍",
        "c_source_file" => "📜",
        "config_file" => "⚙️",
        "json_file" => "🧾",
        "text_file" => "📝",
        "image_file" => "🖼️",
        "audio_file" => "🎵",
        "video_file" => "🎬",
        "archive_file" => "📦",
        "executable_file" => "🚀",
        _ => "📄",
    }
}

/// `<path>\t<kind>`, plus the deciding rule when `explain` is set.
pub fn format_classification(display_path: &Path, classification: &Classification, explain: bool) -> String {
    let mut line = format!("{}\t{}", display_path.display(), classification.kind);
    if explain {
        line.push('\t');
        line.push_str(&classification.source.to_string());
    }
    line
}

pub fn format_capabilities(capabilities: &[Capability]) -> String {
    if capabilities.is_empty() {
        return "none".to_string();
    }
    capabilities
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
