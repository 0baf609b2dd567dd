//! File name helpers shared by the serializers.

/// Strips any directory prefix, accepting both `/` and `\` separators.
///
/// `"a/b\\c/tex.png"` becomes `"tex.png"`.
pub fn file_name(path: &str) -> &str {
    match path.rfind(['/', '\\']) {
        Some(index) => &path[index + 1..],
        None => path,
    }
}

/// File name up to its first `.`; `"walk/hero.anim.png"` becomes `"hero"`.
pub fn file_stem(path: &str) -> &str {
    let name = file_name(path);
    match name.find('.') {
        Some(index) => &name[..index],
        None => name,
    }
}
