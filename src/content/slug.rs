//! Path-derived slugs

/// Derive a URL-safe slug from a record path relative to the content root.
///
/// The extension is dropped, every component is slugified and a trailing
/// `index` is folded into its directory. Returns `None` when any component
/// has nothing URL-safe left in it.
pub fn from_path(path: &str) -> Option<String> {
    let mut components: Vec<&str> = path.split('/').filter(|c| !c.is_empty()).collect();

    let last = components.pop()?;
    let stem = match last.rfind('.') {
        Some(dot) if dot > 0 => &last[..dot],
        _ => last,
    };
    if !(stem == "index" && !components.is_empty()) {
        components.push(stem);
    }

    let mut parts = Vec::with_capacity(components.len());
    for component in components {
        let part = slug::slugify(component);
        if part.is_empty() {
            return None;
        }
        parts.push(part);
    }

    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_file() {
        assert_eq!(from_path("hello-world.md").as_deref(), Some("hello-world"));
        assert_eq!(from_path("Hello World.mdx").as_deref(), Some("hello-world"));
    }

    #[test]
    fn test_nested_and_index() {
        assert_eq!(
            from_path("2023/Road Trip/index.md").as_deref(),
            Some("2023/road-trip")
        );
        assert_eq!(from_path("index.md").as_deref(), Some("index"));
        assert_eq!(from_path("guides/setup.v2.md").as_deref(), Some("guides/setup-v2"));
    }

    #[test]
    fn test_unusable_paths() {
        assert_eq!(from_path(""), None);
        assert_eq!(from_path("drafts/!!!.md"), None);
    }
}
