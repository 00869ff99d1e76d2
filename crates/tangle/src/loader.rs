//! Pragma catalog loading.
//!
//! A catalog holds one fact per line, extracted from source files by an
//! upstream producer:
//!
//! ```text
//! src/com/foobar/model/MagicBean.java:package com.foobar.model;
//! src/com/foobar/model/MagicBean.java:import com.foobar.util.MathUtils;
//! src/com/foobar/model/MagicBean.java:import static com.foobar.util.Log.info;
//! src/com/foobar/view/BeanViewer.java:import com.foobar.model.*;
//! ```
//!
//! ## Naming
//!
//! A source unit is named `<package>.<file stem>`. The package comes from a
//! directory → package table filled in by `package` lines, so sources that
//! share a directory share a package name. If no `package` line has been
//! seen for a directory yet, the directory path itself stands in for the
//! package name. Lines are processed strictly in order, which makes naming
//! sensitive to that order when a file's imports precede its own `package`
//! line.
//!
//! ## Tolerance
//!
//! Lines without a `:` separator, with no pragma tokens, with an unknown
//! keyword or with a missing name are skipped. Only I/O failures abort a load.
//!
//! A `;` ends a token like whitespace does, so `package a;b;` declares
//! package `a` and the trailing `b` is ignored.

use std::collections::HashMap;
use std::io::BufRead;

use crate::types::{Package, SourceUnit};

const PACKAGE: &str = "package";
const IMPORT: &str = "import";
const STATIC: &str = "static";

/// A single structured fact about a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pragma<'a> {
    /// The file belongs to the named package
    Package(&'a str),
    /// The file imports the named class or wildcard package.
    ///
    /// Static imports carry the enclosing class name; the member is dropped.
    Import(&'a str),
}

/// Counts from loading a catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Lines read from the catalog
    pub lines_read: usize,
    /// Lines skipped as blank or malformed
    pub lines_skipped: usize,
}

/// Parse one catalog line into its path and pragma.
///
/// Returns `None` for lines that should be skipped.
///
/// ```
/// use tangle::{parse_line, Pragma};
///
/// let (path, pragma) = parse_line("src/a/Foo.java:import static b.Bar.baz;").unwrap();
/// assert_eq!(path, "src/a/Foo.java");
/// assert_eq!(pragma, Pragma::Import("b.Bar"));
/// ```
#[must_use]
pub fn parse_line(line: &str) -> Option<(&str, Pragma<'_>)> {
    let mut fields = line.trim().split(':');
    let path = fields.next().filter(|p| !p.is_empty())?;
    let mut tokens = fields
        .next()?
        .split(|c: char| c.is_whitespace() || c == ';')
        .filter(|t| !t.is_empty());

    let pragma = match tokens.next()? {
        PACKAGE => Pragma::Package(tokens.next()?),
        IMPORT => match tokens.next()? {
            STATIC => Pragma::Import(sans_member_name(tokens.next()?)),
            name => Pragma::Import(name),
        },
        _ => return None,
    };

    Some((path, pragma))
}

/// Strip the trailing member name: `a.b.Class.member` becomes `a.b.Class`.
fn sans_member_name(name: &str) -> &str {
    name.rsplit_once('.').map_or(name, |(class, _)| class)
}

/// Directory portion of a source path, or the path itself if it has none.
fn package_path(path: &str) -> &str {
    match path.rsplit_once('/') {
        Some((dir, file)) if !dir.is_empty() && !file.is_empty() => dir,
        _ => path,
    }
}

/// File name without its last extension.
fn file_stem(file: &str) -> &str {
    match file.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file,
    }
}

/// Entity tables of a catalog, keyed by name.
#[derive(Debug, Default)]
pub(crate) struct Entities {
    pub(crate) sources: HashMap<String, SourceUnit>,
    pub(crate) packages: HashMap<String, Package>,
    package_paths: HashMap<String, String>,
}

impl Entities {
    /// Read every line of a catalog into the tables.
    ///
    /// Invalid UTF-8 is replaced rather than rejected.
    pub(crate) fn load<R: BufRead>(&mut self, mut reader: R) -> std::io::Result<LoadStats> {
        let mut stats = LoadStats::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            stats.lines_read += 1;

            let line = String::from_utf8_lossy(&buf);
            match parse_line(&line) {
                Some((path, pragma)) => self.record(path, pragma),
                None => stats.lines_skipped += 1,
            }
        }

        Ok(stats)
    }

    /// Apply one pragma for the source at `path`.
    pub(crate) fn record(&mut self, path: &str, pragma: Pragma<'_>) {
        if let Pragma::Package(name) = pragma {
            self.package_paths
                .insert(package_path(path).to_string(), name.to_string());
        }

        let source_name = self.source_name(path);
        let source = self
            .sources
            .entry(source_name.clone())
            .or_insert_with(|| SourceUnit::new(source_name.clone(), path));

        match pragma {
            Pragma::Package(name) => {
                source.set_package(name);
                self.packages
                    .entry(name.to_string())
                    .or_insert_with(|| Package::new(name))
                    .add_source(source_name);
            }
            Pragma::Import(name) => source.add_import_name(name),
        }
    }

    /// Qualified source name for a path, as `<package>.<file stem>`.
    ///
    /// Registers the directory as its own placeholder package name when no
    /// `package` line has claimed it yet.
    fn source_name(&mut self, path: &str) -> String {
        let dir = package_path(path);
        let package = self
            .package_paths
            .entry(dir.to_string())
            .or_insert_with(|| dir.to_string());

        match path.rsplit_once('/') {
            Some((_, file)) => format!("{package}.{}", file_stem(file)),
            None => path.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a/B.java:package a;", "a/B.java", Pragma::Package("a"))]
    #[case("a/B.java:package com.foo.bar", "a/B.java", Pragma::Package("com.foo.bar"))]
    #[case("a/B.java:import x.y.Z;", "a/B.java", Pragma::Import("x.y.Z"))]
    #[case("a/B.java:import x.y.*;", "a/B.java", Pragma::Import("x.y.*"))]
    #[case("a/B.java:import static x.y.Z.member;", "a/B.java", Pragma::Import("x.y.Z"))]
    #[case("a/B.java:import\tx.Y;\r\n", "a/B.java", Pragma::Import("x.Y"))]
    #[case("  a/B.java: import   x.Y ;  ", "a/B.java", Pragma::Import("x.Y"))]
    #[case("a/B.java:package a;b;", "a/B.java", Pragma::Package("a"))]
    #[case("a/B.java:import x.Y;z.W;", "a/B.java", Pragma::Import("x.Y"))]
    fn parses_pragma_lines(
        #[case] line: &str,
        #[case] path: &str,
        #[case] pragma: Pragma<'static>,
    ) {
        assert_eq!(parse_line(line), Some((path, pragma)));
    }

    #[rstest]
    #[case::blank("")]
    #[case::no_separator("a/B.java package a;")]
    #[case::no_pragma("a/B.java:")]
    #[case::only_punctuation("a/B.java: ;")]
    #[case::package_without_name("a/B.java:package;")]
    #[case::import_without_name("a/B.java:import")]
    #[case::static_without_name("a/B.java:import static;")]
    #[case::unknown_keyword("a/B.java:class B {")]
    #[case::empty_path(":package a;")]
    fn skips_malformed_lines(#[case] line: &str) {
        assert_eq!(parse_line(line), None);
    }

    #[rstest]
    #[case("a.b.C.member", "a.b.C")]
    #[case("C.member", "C")]
    #[case("nodots", "nodots")]
    fn strips_member_names(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(sans_member_name(name), expected);
    }

    #[rstest]
    #[case("src/com/foo/Bar.java", "src/com/foo")]
    #[case("Bar.java", "Bar.java")]
    #[case("/Bar.java", "/Bar.java")]
    #[case("src/com/", "src/com/")]
    fn package_path_strips_file_name(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(package_path(path), expected);
    }

    #[rstest]
    #[case("Bar.java", "Bar")]
    #[case("Bar.test.java", "Bar.test")]
    #[case("Makefile", "Makefile")]
    #[case(".hidden", ".hidden")]
    fn file_stem_drops_last_extension(#[case] file: &str, #[case] expected: &str) {
        assert_eq!(file_stem(file), expected);
    }

    fn load(text: &str) -> (Entities, LoadStats) {
        let mut entities = Entities::default();
        let stats = entities.load(text.as_bytes()).unwrap();
        (entities, stats)
    }

    #[test]
    fn package_line_creates_package_and_source() {
        let (entities, stats) = load("src/a/Foo.java:package a;\n");

        assert_eq!(stats, LoadStats { lines_read: 1, lines_skipped: 0 });
        let source = &entities.sources["a.Foo"];
        assert_eq!(source.path(), "src/a/Foo.java");
        assert_eq!(source.package(), Some("a"));
        assert!(entities.packages["a"].sources().contains("a.Foo"));
    }

    #[test]
    fn imports_accumulate_on_the_same_source() {
        let (entities, _) = load(
            "src/a/Foo.java:package a;\n\
             src/a/Foo.java:import b.Bar;\n\
             src/a/Foo.java:import static c.Baz.qux;\n\
             src/a/Foo.java:import b.Bar;\n",
        );

        assert_eq!(entities.sources.len(), 1);
        let names: Vec<&str> = entities.sources["a.Foo"]
            .import_names()
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(names, ["b.Bar", "c.Baz"]);
    }

    #[test]
    fn directory_mapping_names_sources_before_their_package_line() {
        let (entities, _) = load(
            "src/a/Foo.java:package a;\n\
             src/a/Other.java:import b.Bar;\n\
             src/a/Other.java:package a;\n",
        );

        assert_eq!(entities.sources.len(), 2);
        let other = &entities.sources["a.Other"];
        assert_eq!(other.package(), Some("a"));
        assert!(other.import_names().contains("b.Bar"));
    }

    #[test]
    fn import_before_any_package_line_uses_directory_placeholder() {
        let (entities, _) = load(
            "src/a/Foo.java:import b.Bar;\n\
             src/a/Foo.java:package a;\n",
        );

        // The import lands on a source named after the directory; the
        // package line then creates the properly named source.
        let placeholder = &entities.sources["src/a.Foo"];
        assert_eq!(placeholder.package(), None);
        assert!(placeholder.import_names().contains("b.Bar"));

        let named = &entities.sources["a.Foo"];
        assert_eq!(named.package(), Some("a"));
        assert!(named.import_names().is_empty());
    }

    #[test]
    fn path_without_directory_is_its_own_name() {
        let (entities, _) = load("Foo.java:package a;\n");

        assert!(entities.sources.contains_key("Foo.java"));
        assert!(entities.packages["a"].sources().contains("Foo.java"));
    }

    #[test]
    fn malformed_lines_are_counted_and_skipped() {
        let (entities, stats) = load(
            "garbage without separator\n\
             \n\
             src/a/Foo.java:package a;\n\
             src/a/Foo.java:\n",
        );

        assert_eq!(stats.lines_read, 4);
        assert_eq!(stats.lines_skipped, 3);
        assert_eq!(entities.sources.len(), 1);
    }

    #[test]
    fn invalid_utf8_is_tolerated() {
        let mut entities = Entities::default();
        let bytes: &[u8] = b"src/a/Foo.java:package a;\nsrc/a/\xff.java:import b.B;\n";

        let stats = entities.load(bytes).unwrap();

        assert_eq!(stats.lines_read, 2);
        assert!(entities.packages.contains_key("a"));
    }

    #[test]
    fn last_line_without_newline_is_read() {
        let (entities, stats) = load("src/a/Foo.java:package a;");

        assert_eq!(stats.lines_read, 1);
        assert!(entities.sources.contains_key("a.Foo"));
    }
}
