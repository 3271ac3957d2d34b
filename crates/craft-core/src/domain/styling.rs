//! Plugin registration in the styling configuration file.
//!
//! This is plain text surgery on the `plugins: [...]` array (plus `import`
//! lines for ES modules); the file is never parsed as JavaScript. Patching
//! only ever adds registrations.

/// Result of trying to register plugins in a configuration source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginPatch {
    /// New source text with the missing plugins appended.
    Patched(String),
    /// Every plugin is already registered.
    AlreadyPresent,
    /// The source has no `plugins: [` array to extend.
    NoPluginsArray,
}

/// How the configuration file loads its plugins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleStyle {
    /// `require("<package>")` inline in the array.
    CommonJs,
    /// `import <ident> from "<package>";` at the top, `<ident>` in the array.
    Esm,
}

impl ModuleStyle {
    /// `.mjs` and `.cjs` decide on their own; any other file is ESM when it
    /// has a top-level `import` or an `export default`.
    pub fn detect(file_name: &str, source: &str) -> Self {
        if file_name.ends_with(".mjs") {
            return Self::Esm;
        }
        if file_name.ends_with(".cjs") {
            return Self::CommonJs;
        }
        let esm = source.contains("export default")
            || source.lines().any(|line| line.trim_start().starts_with("import "));
        if esm { Self::Esm } else { Self::CommonJs }
    }
}

/// Registration expression for a plugin package.
pub fn plugin_expression(package: &str) -> String {
    format!("require(\"{package}\")")
}

/// `true` when the source mentions `package` as a quoted module specifier
/// anywhere, whether in an `import`, a `require` or the array itself.
fn is_referenced(source: &str, package: &str) -> bool {
    source.contains(&format!("\"{package}\"")) || source.contains(&format!("'{package}'"))
}

/// Binding name for an imported plugin: the last path segment in
/// camelCase, e.g. `@tailwindcss/typography` -> `typography` and
/// `tailwindcss-animate` -> `tailwindcssAnimate`.
fn import_binding(package: &str, source: &str, taken: &[String]) -> String {
    let segment = package.rsplit('/').next().unwrap_or(package);
    let mut base = String::with_capacity(segment.len());
    let mut upper = false;
    for ch in segment.chars() {
        if ch.is_ascii_alphanumeric() {
            if upper && !base.is_empty() {
                base.push(ch.to_ascii_uppercase());
            } else {
                base.push(ch);
            }
            upper = false;
        } else {
            upper = true;
        }
    }
    if base.is_empty() || base.starts_with(|c: char| c.is_ascii_digit()) {
        base.insert_str(0, "plugin");
    }

    let free = |name: &str| !contains_identifier(source, name) && !taken.iter().any(|t| t == name);
    if free(base.as_str()) {
        return base;
    }
    let suffixed = format!("{base}Plugin");
    if free(suffixed.as_str()) {
        return suffixed;
    }
    (2u32..)
        .map(|n| format!("{suffixed}{n}"))
        .find(|name| free(name.as_str()))
        .unwrap_or(suffixed)
}

fn contains_identifier(source: &str, name: &str) -> bool {
    let is_ident = |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '$';
    source.match_indices(name).any(|(at, _)| {
        let before = source[..at].chars().next_back();
        let after = source[at + name.len()..].chars().next();
        !before.is_some_and(is_ident) && !after.is_some_and(is_ident)
    })
}

/// Byte offset just past the last single-line `import` statement, or 0.
fn import_insertion_point(source: &str) -> usize {
    let mut offset = 0;
    let mut insert_at = 0;
    for line in source.split_inclusive('\n') {
        offset += line.len();
        let trimmed = line.trim();
        let complete = trimmed.ends_with(';') || trimmed.ends_with('"') || trimmed.ends_with('\'');
        if trimmed.starts_with("import ") && complete {
            insert_at = offset;
        }
    }
    insert_at
}

/// Register every package the source does not reference yet.
///
/// CommonJS sources get `require("<package>")` entries. ESM sources get an
/// `import` line per package and its binding in the array, since `require`
/// is not defined in an ES module.
pub fn register_plugins(source: &str, packages: &[String], style: ModuleStyle) -> PluginPatch {
    let Some((open, close)) = find_plugins_array(source) else {
        return PluginPatch::NoPluginsArray;
    };

    let missing: Vec<&String> = packages
        .iter()
        .filter(|pkg| !is_referenced(source, pkg))
        .collect();
    if missing.is_empty() {
        return PluginPatch::AlreadyPresent;
    }

    let (imports, entries): (Vec<String>, Vec<String>) = match style {
        ModuleStyle::CommonJs => (
            Vec::new(),
            missing.iter().map(|pkg| plugin_expression(pkg)).collect(),
        ),
        ModuleStyle::Esm => {
            let mut bindings: Vec<String> = Vec::new();
            for pkg in &missing {
                let binding = import_binding(pkg, source, &bindings);
                bindings.push(binding);
            }
            let imports = missing
                .iter()
                .zip(&bindings)
                .map(|(pkg, binding)| format!("import {binding} from \"{pkg}\";\n"))
                .collect();
            (imports, bindings)
        }
    };

    let head = source[..close].trim_end();
    let separator = if head.ends_with('[') {
        ""
    } else if head.ends_with(',') {
        " "
    } else {
        ", "
    };
    let import_at = import_insertion_point(&source[..open]);
    let mut patched = String::with_capacity(source.len() + 128);
    patched.push_str(&source[..import_at]);
    for line in &imports {
        patched.push_str(line);
    }
    patched.push_str(&source[import_at..head.len()]);
    patched.push_str(separator);
    patched.push_str(&entries.join(", "));
    patched.push_str(&source[head.len()..]);
    PluginPatch::Patched(patched)
}

/// Byte offsets of the `[` and matching `]` of the `plugins` array.
fn find_plugins_array(source: &str) -> Option<(usize, usize)> {
    let mut search_from = 0;
    while let Some(found) = source[search_from..].find("plugins") {
        let key_end = search_from + found + "plugins".len();
        search_from = key_end;

        let after_key = &source[key_end..];
        let Some(rest) = after_key.trim_start().strip_prefix(':') else {
            continue;
        };
        let rest_trimmed = rest.trim_start();
        if !rest_trimmed.starts_with('[') {
            continue;
        }

        let open = source.len() - rest_trimmed.len();
        if let Some(close) = matching_bracket(source, open) {
            return Some((open, close));
        }
    }
    None
}

fn matching_bracket(source: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, ch) in source[open..].char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + offset);
                }
            }
            _ => {}
        }
    }
    None
}
