//! Object key generation
//!
//! Centralized so the gateway, the pipeline and tests agree on one key
//! layout. Candidate names come from untrusted callers; everything is
//! reduced to a single flat path component before joining.

use uuid::Uuid;

/// Join a subdirectory and a file name into a flat object key.
///
/// The subdirectory is stripped of empty, `.` and `..` segments and of
/// leading/trailing separators; the file name is reduced to its final path
/// component. Non-empty parts are joined with exactly one `/`.
pub fn build_object_key(sub_dir: &str, file_name: &str) -> String {
    let dir = clean_sub_dir(sub_dir);
    let name = sanitize_base_name(file_name);

    match (dir.is_empty(), name.is_empty()) {
        (true, _) => name.to_string(),
        (_, true) => dir,
        (false, false) => format!("{dir}/{name}"),
    }
}

fn clean_sub_dir(sub_dir: &str) -> String {
    sub_dir
        .split('/')
        .filter(|part| !part.is_empty() && *part != "." && *part != "..")
        .collect::<Vec<_>>()
        .join("/")
}

/// Reduce an untrusted candidate to its final path component. Traversal
/// segments and bare separators collapse to the empty string.
fn sanitize_base_name(candidate: &str) -> &str {
    let name = candidate
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or("")
        .trim();
    match name {
        "" | "." | ".." => "",
        other => other,
    }
}

/// Name candidates for a resolved file, strongest first.
#[derive(Debug, Default)]
pub struct NameCandidates<'a> {
    /// Explicit override supplied by the caller.
    pub override_name: Option<&'a str>,
    /// Caller-preferred name (e.g. the document's declared file name).
    pub preferred_name: Option<&'a str>,
    /// Remote transfer path returned by the platform.
    pub remote_path: Option<&'a str>,
    /// Opaque file reference, used for the generated fallback.
    pub file_id: &'a str,
}

/// Resolve the display base name for a file.
///
/// Precedence: explicit override > preferred name > basename of the remote
/// path > `{file_id}.{extension guessed from the remote path}`, with `bin`
/// as the generic fallback extension. The result is never empty.
pub fn resolve_base_name(candidates: &NameCandidates<'_>) -> String {
    for candidate in [candidates.override_name, candidates.preferred_name] {
        if let Some(name) = candidate {
            let name = sanitize_base_name(name);
            if !name.is_empty() {
                return name.to_string();
            }
        }
    }

    if let Some(path) = candidates.remote_path {
        let name = sanitize_base_name(path);
        if !name.is_empty() {
            return name.to_string();
        }
    }

    let extension = candidates
        .remote_path
        .and_then(|path| guess_extension(path))
        .unwrap_or("bin");
    format!("{}.{}", sanitize_base_name(candidates.file_id), extension)
}

fn guess_extension(path: &str) -> Option<&str> {
    let name = path.rsplit('/').next()?;
    let (stem, extension) = name.rsplit_once('.')?;
    if stem.is_empty() || extension.is_empty() {
        None
    } else {
        Some(extension)
    }
}

/// Fresh storage identity for a display name. The random prefix prevents
/// same-name overwrite races between concurrent uploads into one
/// subdirectory; the uuid is what the catalog records, while notifications
/// keep showing the display name embedded in the key.
#[derive(Debug, Clone)]
pub struct ObjectIdentity {
    pub object_id: Uuid,
    pub stored_name: String,
}

impl ObjectIdentity {
    pub fn new(display_name: &str) -> Self {
        let object_id = Uuid::new_v4();
        let stored_name = format!("{object_id}_{display_name}");
        Self {
            object_id,
            stored_name,
        }
    }
}
