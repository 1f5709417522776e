//! Source file discovery.
//!
//! A [`SourceEnumerator`] turns whatever the host knows about a project into
//! units (build targets) with classified input files. Two flavours exist:
//! [`PackageGraph`] walks a conventional Swift package layout, [`FileList`]
//! wraps a flat list of input files handed over by the host.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::config::{resolve_configuration, resolve_from_inputs};

/// Directories under the package root whose children are units.
pub const UNIT_DIRECTORIES: [&str; 3] = ["Sources", "Tests", "Plugins"];

/// How the host classifies an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Source,
    Header,
    Resource,
    Unknown,
}

impl FileKind {
    pub fn classify(path: &Path) -> Self {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return FileKind::Unknown;
        };

        match ext.to_ascii_lowercase().as_str() {
            "swift" | "c" | "cc" | "cpp" | "cxx" | "m" | "mm" | "s" => FileKind::Source,
            "h" | "hh" | "hpp" | "modulemap" => FileKind::Header,
            "json" | "plist" | "xcassets" | "xib" | "storyboard" | "strings" | "png" | "jpg"
            | "txt" | "md" | "xcprivacy" => FileKind::Resource,
            _ => FileKind::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub path: PathBuf,
    pub kind: FileKind,
}

impl InputFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let kind = FileKind::classify(&path);
        Self { path, kind }
    }
}

/// A build target and its input files, in host order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub name: String,
    pub files: Vec<InputFile>,
}

impl Unit {
    /// Source files with the given extension. Order is kept and duplicates
    /// are not removed.
    pub fn source_files(&self, extension: &str) -> Vec<PathBuf> {
        self.files
            .iter()
            .filter(|f| f.kind == FileKind::Source)
            .filter(|f| f.path.extension().is_some_and(|e| e == extension))
            .map(|f| f.path.clone())
            .collect()
    }
}

/// Host capability: list units and the configuration that applies to them.
pub trait SourceEnumerator {
    /// Directory the project lives in.
    fn root(&self) -> &Path;

    fn units(&self) -> io::Result<Vec<Unit>>;

    /// swift-format configuration for this project, looked up fresh on each call.
    fn configuration(&self) -> Option<PathBuf> {
        resolve_configuration(self.root())
    }

    fn unit(&self, name: &str) -> io::Result<Option<Unit>> {
        Ok(self.units()?.into_iter().find(|u| u.name == name))
    }
}

/// Units found in a Swift package laid out by convention.
///
/// Every directory below `Sources/`, `Tests/` and `Plugins/` is one unit.
/// Project manifests are not parsed.
#[derive(Debug, Clone)]
pub struct PackageGraph {
    root: PathBuf,
}

impl PackageGraph {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl SourceEnumerator for PackageGraph {
    fn root(&self) -> &Path {
        &self.root
    }

    fn units(&self) -> io::Result<Vec<Unit>> {
        let mut units = vec![];

        for group in UNIT_DIRECTORIES {
            let group_dir = self.root.join(group);
            if !group_dir.is_dir() {
                continue;
            }

            let mut dirs: Vec<PathBuf> = fs::read_dir(&group_dir)?
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|path| path.is_dir() && !is_hidden(path))
                .collect();
            dirs.sort();

            for dir in dirs {
                let name = dir
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let files = walk_unit(&dir)?;
                units.push(Unit { name, files });
            }
        }

        Ok(units)
    }
}

/// A single unit made of files the host listed explicitly.
#[derive(Debug, Clone)]
pub struct FileList {
    root: PathBuf,
    unit: Unit,
}

impl FileList {
    pub fn new(root: impl Into<PathBuf>, name: impl Into<String>, paths: Vec<PathBuf>) -> Self {
        let root = root.into();
        let files = paths
            .into_iter()
            .map(|p| if p.is_absolute() { p } else { root.join(p) })
            .map(InputFile::new)
            .collect();

        Self {
            root,
            unit: Unit {
                name: name.into(),
                files,
            },
        }
    }

    /// Read one path per line, skipping blank lines and `#` comments.
    pub fn read_from(root: impl Into<PathBuf>, name: &str, list: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(list)?;
        let paths = parse_file_list(&content);
        Ok(Self::new(root, name, paths))
    }
}

impl SourceEnumerator for FileList {
    fn root(&self) -> &Path {
        &self.root
    }

    fn units(&self) -> io::Result<Vec<Unit>> {
        Ok(vec![self.unit.clone()])
    }

    /// A configuration among the listed inputs wins; otherwise the root is searched.
    fn configuration(&self) -> Option<PathBuf> {
        resolve_from_inputs(self.unit.files.iter().map(|f| f.path.as_path()))
            .or_else(|| resolve_configuration(&self.root))
    }
}

pub fn parse_file_list(content: &str) -> Vec<PathBuf> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(PathBuf::from)
        .collect()
}

/// Result of matching user-supplied unit names.
#[derive(Debug, Default)]
pub struct Selection {
    pub units: Vec<Unit>,
    /// Names that matched nothing.
    pub missing: Vec<String>,
}

/// Pick units by name; no names selects every unit.
pub fn select_units<E>(enumerator: &E, names: &[String]) -> io::Result<Selection>
where
    E: SourceEnumerator + ?Sized,
{
    let all = enumerator.units()?;

    if names.is_empty() {
        return Ok(Selection {
            units: all,
            missing: vec![],
        });
    }

    let mut selection = Selection::default();
    for name in names {
        match all.iter().find(|u| &u.name == name) {
            Some(unit) => selection.units.push(unit.clone()),
            None => selection.missing.push(name.clone()),
        }
    }

    Ok(selection)
}

fn walk_unit(dir: &Path) -> io::Result<Vec<InputFile>> {
    let walker = WalkBuilder::new(dir)
        .hidden(true) // Skip hidden files
        .git_ignore(true) // Respect .gitignore
        .git_global(true)
        .git_exclude(true)
        .build();

    let mut paths = vec![];
    for entry in walker {
        let entry = entry.map_err(|e| io::Error::other(e.to_string()))?;
        if entry.file_type().is_some_and(|ft| ft.is_file()) {
            paths.push(entry.into_path());
        }
    }
    paths.sort();

    Ok(paths.into_iter().map(InputFile::new).collect())
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "").unwrap();
        path
    }

    #[test]
    fn test_classify() {
        assert_eq!(FileKind::classify(Path::new("a.swift")), FileKind::Source);
        assert_eq!(FileKind::classify(Path::new("A.M")), FileKind::Source);
        assert_eq!(FileKind::classify(Path::new("a.h")), FileKind::Header);
        assert_eq!(FileKind::classify(Path::new("a.json")), FileKind::Resource);
        assert_eq!(FileKind::classify(Path::new("Makefile")), FileKind::Unknown);
        assert_eq!(FileKind::classify(Path::new("a.swp")), FileKind::Unknown);
    }

    #[test]
    fn test_source_files_filters_kind_and_extension() {
        let unit = Unit {
            name: "App".into(),
            files: vec![
                InputFile::new("/p/b.swift"),
                InputFile::new("/p/data.json"),
                InputFile::new("/p/shim.c"),
                InputFile::new("/p/a.swift"),
                InputFile::new("/p/b.swift"),
            ],
        };

        assert_eq!(
            unit.source_files("swift"),
            vec![
                PathBuf::from("/p/b.swift"),
                PathBuf::from("/p/a.swift"),
                PathBuf::from("/p/b.swift"),
            ]
        );
        assert_eq!(unit.source_files("c"), vec![PathBuf::from("/p/shim.c")]);
    }

    #[test]
    fn test_package_graph_units() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "Sources/Core/Model.swift");
        touch(dir.path(), "Sources/Core/Nested/View.swift");
        touch(dir.path(), "Sources/App/main.swift");
        touch(dir.path(), "Tests/CoreTests/ModelTests.swift");
        touch(dir.path(), "Docs/readme.swift");

        let graph = PackageGraph::new(dir.path());
        let units = graph.units().unwrap();
        let names: Vec<_> = units.iter().map(|u| u.name.as_str()).collect();

        assert_eq!(names, ["App", "Core", "CoreTests"]);

        let core = &units[1];
        assert_eq!(
            core.source_files("swift"),
            vec![
                dir.path().join("Sources/Core/Model.swift"),
                dir.path().join("Sources/Core/Nested/View.swift"),
            ]
        );
    }

    #[test]
    fn test_package_graph_skips_hidden_and_gitignored() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join(".gitignore"), "Generated.swift\n").unwrap();
        touch(dir.path(), "Sources/App/main.swift");
        touch(dir.path(), "Sources/App/Generated.swift");
        touch(dir.path(), "Sources/App/.hidden.swift");
        touch(dir.path(), "Sources/.build/Cache.swift");

        let units = PackageGraph::new(dir.path()).units().unwrap();

        assert_eq!(units.len(), 1);
        assert_eq!(
            units[0].source_files("swift"),
            vec![dir.path().join("Sources/App/main.swift")]
        );
    }

    #[test]
    fn test_package_graph_without_sources() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "Package.swift");

        assert!(PackageGraph::new(dir.path()).units().unwrap().is_empty());
    }

    #[test]
    fn test_package_graph_configuration_from_root() {
        let dir = TempDir::new().unwrap();
        let config = touch(dir.path(), ".swift-format");

        assert_eq!(PackageGraph::new(dir.path()).configuration(), Some(config));
    }

    #[test]
    fn test_file_list_resolves_relative_paths() {
        let list = FileList::new(
            "/proj",
            "App",
            vec![PathBuf::from("b.swift"), PathBuf::from("/abs/a.swift")],
        );

        let units = list.units().unwrap();
        assert_eq!(units.len(), 1);
        assert_eq!(
            units[0].source_files("swift"),
            vec![PathBuf::from("/proj/b.swift"), PathBuf::from("/abs/a.swift")]
        );
    }

    #[test]
    fn test_file_list_configuration_from_inputs() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), ".swiftformat");

        let list = FileList::new(
            dir.path(),
            "App",
            vec![
                PathBuf::from("main.swift"),
                PathBuf::from("/elsewhere/.swift-format"),
            ],
        );

        assert_eq!(
            list.configuration(),
            Some(PathBuf::from("/elsewhere/.swift-format"))
        );
    }

    #[test]
    fn test_file_list_configuration_falls_back_to_root() {
        let dir = TempDir::new().unwrap();
        let config = touch(dir.path(), ".swiftformat");

        let list = FileList::new(dir.path(), "App", vec![PathBuf::from("main.swift")]);

        assert_eq!(list.configuration(), Some(config));
    }

    #[test]
    fn test_parse_file_list() {
        let paths = parse_file_list("a.swift\n\n  # generated\n /p/b.swift \n");
        assert_eq!(
            paths,
            vec![PathBuf::from("a.swift"), PathBuf::from("/p/b.swift")]
        );
    }

    #[test]
    fn test_select_all_units_when_no_names() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "Sources/A/a.swift");
        touch(dir.path(), "Sources/B/b.swift");

        let selection = select_units(&PackageGraph::new(dir.path()), &[]).unwrap();
        assert_eq!(selection.units.len(), 2);
        assert!(selection.missing.is_empty());
    }

    #[test]
    fn test_select_units_reports_missing_names() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "Sources/A/a.swift");
        touch(dir.path(), "Sources/B/b.swift");

        let names = vec!["B".to_string(), "Nope".to_string()];
        let selection = select_units(&PackageGraph::new(dir.path()), &names).unwrap();

        assert_eq!(selection.units.len(), 1);
        assert_eq!(selection.units[0].name, "B");
        assert_eq!(selection.missing, vec!["Nope".to_string()]);
    }
}
