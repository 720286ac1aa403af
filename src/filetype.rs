//! Extension and filename heuristics.
//!
//! Everything here is best effort. It drives binary pre-classification, fence language
//! hints, the technical stack line and the one-line file descriptions in `llms.txt`.

/// Extensions treated as binary without reading the file.
const BINARY_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "ico", "webp", "tiff", "psd", "pdf", "zip", "gz",
    "tgz", "bz2", "xz", "7z", "rar", "tar", "jar", "war", "class", "exe", "dll", "so",
    "dylib", "a", "o", "obj", "lib", "bin", "wasm", "pyc", "pyo", "woff", "woff2", "ttf",
    "otf", "eot", "mp3", "mp4", "wav", "ogg", "flac", "avi", "mov", "mkv", "webm", "sqlite",
    "db", "dat",
];

/// Number of leading bytes inspected when sniffing content.
pub const SNIFF_LEN: usize = 8000;

pub fn extension(path: &str) -> Option<String> {
    let name = file_name(path);
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

pub fn has_binary_extension(path: &str) -> bool {
    extension(path).is_some_and(|ext| BINARY_EXTENSIONS.contains(&ext.as_str()))
}

/// Content sniffing: a NUL byte, or bytes that are not valid UTF-8.
///
/// A multi-byte sequence cut off by the end of `sample` does not count as invalid.
pub fn looks_binary(sample: &[u8]) -> bool {
    let sample = &sample[..sample.len().min(SNIFF_LEN)];
    if sample.contains(&0) {
        return true;
    }
    match std::str::from_utf8(sample) {
        Ok(_) => false,
        Err(e) => e.error_len().is_some(),
    }
}

/// Language name for an extension, used for fence hints and the stack summary.
pub fn language(path: &str) -> Option<&'static str> {
    let name = file_name(path);
    match name {
        "Dockerfile" => return Some("Docker"),
        "Makefile" | "makefile" | "GNUmakefile" => return Some("Make"),
        _ => {}
    }
    let lang = match extension(path)?.as_str() {
        "py" | "pyi" => "Python",
        "rs" => "Rust",
        "js" | "mjs" | "cjs" => "JavaScript",
        "jsx" => "JavaScript/React",
        "ts" | "mts" | "cts" => "TypeScript",
        "tsx" => "TypeScript/React",
        "go" => "Go",
        "java" => "Java",
        "kt" | "kts" => "Kotlin",
        "scala" => "Scala",
        "rb" => "Ruby",
        "php" => "PHP",
        "c" | "h" => "C",
        "cc" | "cpp" | "cxx" | "hpp" | "hh" => "C++",
        "cs" => "C#",
        "swift" => "Swift",
        "m" | "mm" => "Objective-C",
        "dart" => "Dart",
        "lua" => "Lua",
        "pl" | "pm" => "Perl",
        "r" => "R",
        "jl" => "Julia",
        "ex" | "exs" => "Elixir",
        "erl" | "hrl" => "Erlang",
        "hs" => "Haskell",
        "ml" | "mli" => "OCaml",
        "clj" | "cljs" => "Clojure",
        "zig" => "Zig",
        "sh" | "bash" | "zsh" => "Shell",
        "ps1" => "PowerShell",
        "sql" => "SQL",
        "html" | "htm" => "HTML",
        "css" => "CSS",
        "scss" | "sass" => "Sass",
        "vue" => "Vue",
        "svelte" => "Svelte",
        "md" | "markdown" => "Markdown",
        "rst" => "reStructuredText",
        "json" => "JSON",
        "yaml" | "yml" => "YAML",
        "toml" => "TOML",
        "xml" => "XML",
        "proto" => "Protocol Buffers",
        "tf" => "Terraform",
        _ => return None,
    };
    Some(lang)
}

/// Languages that count as a technical stack, as opposed to markup and data formats.
pub fn is_programming_language(language: &str) -> bool {
    !matches!(
        language,
        "Markdown" | "reStructuredText" | "JSON" | "YAML" | "TOML" | "XML" | "Make" | "Docker"
    )
}

/// Info string for a fenced code block.
pub fn fence_hint(path: &str) -> &'static str {
    let name = file_name(path);
    match name {
        "Dockerfile" => return "dockerfile",
        "Makefile" | "makefile" | "GNUmakefile" => return "makefile",
        _ => {}
    }
    let Some(ext) = extension(path) else {
        return "";
    };
    match ext.as_str() {
        "py" | "pyi" => "python",
        "rs" => "rust",
        "js" | "mjs" | "cjs" | "jsx" => "javascript",
        "ts" | "mts" | "cts" | "tsx" => "typescript",
        "go" => "go",
        "java" => "java",
        "kt" | "kts" => "kotlin",
        "rb" => "ruby",
        "php" => "php",
        "c" | "h" => "c",
        "cc" | "cpp" | "cxx" | "hpp" | "hh" => "cpp",
        "cs" => "csharp",
        "swift" => "swift",
        "sh" | "bash" | "zsh" => "bash",
        "sql" => "sql",
        "html" | "htm" => "html",
        "css" => "css",
        "scss" | "sass" => "scss",
        "md" | "markdown" => "markdown",
        "json" => "json",
        "yaml" | "yml" => "yaml",
        "toml" => "toml",
        "xml" => "xml",
        "lua" => "lua",
        "r" => "r",
        "zig" => "zig",
        "hs" => "haskell",
        "ex" | "exs" => "elixir",
        _ => "",
    }
}

/// Conventional entry point file names.
pub fn is_entry_point(path: &str) -> bool {
    matches!(
        file_name(path).to_lowercase().as_str(),
        "main.py"
            | "app.py"
            | "__main__.py"
            | "index.js"
            | "index.ts"
            | "main.js"
            | "main.ts"
            | "main.rs"
            | "main.go"
            | "main.c"
            | "main.cpp"
            | "program.cs"
    )
}

pub fn is_readme(path: &str) -> bool {
    let lowered = file_name(path).to_lowercase();
    lowered == "readme" || lowered.starts_with("readme.")
}

pub fn is_test(path: &str) -> bool {
    let lowered = path.to_lowercase();
    lowered.split('/').any(|part| part == "tests" || part == "test" || part == "__tests__")
        || file_name(&lowered).contains("test")
        || file_name(&lowered).contains(".spec.")
}

pub fn is_config(path: &str) -> bool {
    let lowered = file_name(path).to_lowercase();
    matches!(
        lowered.as_str(),
        "config.json"
            | "settings.py"
            | ".env.example"
            | "cargo.toml"
            | "package.json"
            | "pyproject.toml"
            | "setup.py"
            | "setup.cfg"
            | "requirements.txt"
            | "go.mod"
            | "pom.xml"
            | "build.gradle"
            | "tsconfig.json"
            | "dockerfile"
            | "docker-compose.yml"
            | "makefile"
            | ".gitignore"
            | ".editorconfig"
    ) || lowered.starts_with("config.")
}

/// One-line description of a file derived from its name and extension.
pub fn describe(path: &str) -> String {
    let name = file_name(path);
    let lowered = name.to_lowercase();

    let known = match lowered.as_str() {
        "cargo.toml" => Some("Rust package manifest"),
        "cargo.lock" => Some("Rust dependency lockfile"),
        "package.json" => Some("Node.js package manifest"),
        "package-lock.json" | "yarn.lock" | "pnpm-lock.yaml" => Some("Node.js dependency lockfile"),
        "pyproject.toml" => Some("Python project configuration"),
        "setup.py" | "setup.cfg" => Some("Python packaging script"),
        "requirements.txt" => Some("Python dependency list"),
        "go.mod" => Some("Go module definition"),
        "pom.xml" => Some("Maven build configuration"),
        "build.gradle" => Some("Gradle build configuration"),
        "tsconfig.json" => Some("TypeScript compiler configuration"),
        "dockerfile" => Some("Container image build recipe"),
        "docker-compose.yml" | "docker-compose.yaml" => Some("Container composition"),
        "makefile" | "gnumakefile" => Some("Build automation rules"),
        ".gitignore" => Some("Git ignore rules"),
        ".editorconfig" => Some("Editor settings"),
        ".env.example" => Some("Example environment variables"),
        "__init__.py" => Some("Python package marker"),
        "lib.rs" => Some("Rust library root"),
        "mod.rs" => Some("Rust module root"),
        _ => None,
    };
    if let Some(description) = known {
        return description.to_string();
    }

    if is_readme(path) {
        return "Project overview and usage".to_string();
    }
    if lowered.starts_with("license") || lowered.starts_with("copying") {
        return "License terms".to_string();
    }
    if lowered.starts_with("changelog") || lowered.starts_with("changes") {
        return "Release history".to_string();
    }
    if lowered.starts_with("contributing") {
        return "Contribution guidelines".to_string();
    }

    let language = language(path);
    if is_entry_point(path) {
        return match language {
            Some(lang) => format!("{} entry point", lang),
            None => "Entry point".to_string(),
        };
    }
    if is_test(path) {
        return match language {
            Some(lang) => format!("{} tests", lang),
            None => "Tests".to_string(),
        };
    }
    if is_config(path) {
        return "Configuration".to_string();
    }

    match language {
        Some(lang) if is_programming_language(lang) => format!("{} source", lang),
        Some(lang) => format!("{} document", lang),
        None => match extension(path).as_deref() {
            Some("txt") => "Plain text".to_string(),
            Some("csv") | Some("tsv") => "Tabular data".to_string(),
            Some("svg") => "Vector image".to_string(),
            Some(ext) => format!("{} file", ext.to_uppercase()),
            None => "File".to_string(),
        },
    }
}
