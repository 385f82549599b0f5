//! Type keywords that never name another documented entity.

/// Scalar type keywords, plus names that only show up in documentation
/// (such as `mixed` or `number`).
pub const PRIMITIVES: &[&str] = &[
    "self", "bool", "callable", "iterable", "mixed", "int", "string", "array", "float", "double",
    "number", "void", "object", "resource",
];

/// Determine whether `token` is a primitive type keyword.
pub fn is_primitive(token: &str) -> bool {
    PRIMITIVES.contains(&token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_primitive() {
        assert!(is_primitive("int"));
        assert!(is_primitive("mixed"));
        assert!(!is_primitive("Int"));
        assert!(!is_primitive("Circle"));
        assert!(!is_primitive(""));
    }
}
