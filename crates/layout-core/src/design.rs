//! Design description: which classes get generated device files
//!
//! Every class with device logic owns a hand-written header and body under
//! `Device/`. [`augment`] folds those into a loaded manifest so the checker
//! expects them without anyone listing them by hand.

use std::path::{Path, PathBuf};

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;

use crate::manifest::{FileFlags, Manifest};
use crate::{Error, Result};

/// XML namespace of design files.
pub const DESIGN_NAMESPACE: &str = "http://cern.ch/quasar/Design";

/// Manifest directory holding device headers.
pub const DEVICE_INCLUDE_DIR: &str = "Device/include";

/// Manifest directory holding device bodies.
pub const DEVICE_SRC_DIR: &str = "Device/src";

/// A class declared in the design.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignClass {
    pub name: String,
    pub has_device_logic: bool,
}

impl DesignClass {
    pub fn new(name: impl Into<String>, has_device_logic: bool) -> Self {
        Self {
            name: name.into(),
            has_device_logic,
        }
    }

    /// `D<Class>.h`
    pub fn device_header_name(&self) -> String {
        format!("D{}.h", self.name)
    }

    /// `D<Class>.cpp`
    pub fn device_body_name(&self) -> String {
        format!("D{}.cpp", self.name)
    }
}

/// Supplies the classes of a design, in declaration order.
pub trait DesignSource {
    fn classes(&self) -> Result<Vec<DesignClass>>;
}

/// Reads classes from a design XML file.
#[derive(Debug, Clone)]
pub struct XmlDesign {
    path: PathBuf,
}

impl XmlDesign {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DesignSource for XmlDesign {
    fn classes(&self) -> Result<Vec<DesignClass>> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| Error::io(&self.path, e))?;
        parse_classes(&text).map_err(|message| Error::Design {
            path: self.path.clone(),
            message,
        })
    }
}

/// A fixed list of classes.
#[derive(Debug, Clone, Default)]
pub struct StaticDesign(pub Vec<DesignClass>);

impl DesignSource for StaticDesign {
    fn classes(&self) -> Result<Vec<DesignClass>> {
        Ok(self.0.clone())
    }
}

/// Collect the `class` children of the document root.
///
/// A class has device logic when it has a direct `devicelogic` child. Only
/// elements in [`DESIGN_NAMESPACE`] count.
pub fn parse_classes(text: &str) -> std::result::Result<Vec<DesignClass>, String> {
    let mut reader = NsReader::from_str(text);
    let mut classes = Vec::new();
    let mut depth = 0usize;
    // Whether the open depth-2 element is a design `class`.
    let mut in_class = false;

    loop {
        let (ns, event) = reader.read_resolved_event().map_err(|e| e.to_string())?;
        match event {
            Event::Start(start) => {
                depth += 1;
                let is_design = in_design_namespace(&ns);
                if depth == 2 {
                    in_class = is_design && start.local_name().as_ref() == b"class";
                }
                visit(&start, depth, is_design, in_class, &mut classes)?;
            }
            Event::Empty(start) => {
                let is_design = in_design_namespace(&ns);
                visit(&start, depth + 1, is_design, in_class, &mut classes)?;
            }
            Event::End(_) => {
                if depth == 2 {
                    in_class = false;
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    tracing::debug!(classes = classes.len(), "Parsed design");
    Ok(classes)
}

fn in_design_namespace(ns: &ResolveResult<'_>) -> bool {
    matches!(ns, ResolveResult::Bound(Namespace(uri)) if *uri == DESIGN_NAMESPACE.as_bytes())
}

/// Depth 1 is the root, 2 its children, 3 their children.
fn visit(
    start: &BytesStart<'_>,
    depth: usize,
    is_design: bool,
    in_class: bool,
    classes: &mut Vec<DesignClass>,
) -> std::result::Result<(), String> {
    if !is_design {
        return Ok(());
    }
    let local = start.local_name();
    match (depth, local.as_ref()) {
        (2, b"class") => {
            let name = start
                .try_get_attribute("name")
                .map_err(|e| e.to_string())?
                .ok_or_else(|| "class without a name attribute".to_string())?
                .unescape_value()
                .map_err(|e| e.to_string())?
                .into_owned();
            classes.push(DesignClass::new(name, false));
        }
        (3, b"devicelogic") if in_class => {
            if let Some(class) = classes.last_mut() {
                class.has_device_logic = true;
            }
        }
        _ => {}
    }
    Ok(())
}

/// Add the device header and body of every class with device logic.
///
/// Both are required and versioned. Files the manifest already lists are
/// left alone; missing device directories are appended. Returns the number
/// of entries added.
pub fn augment(manifest: &mut Manifest, classes: &[DesignClass]) -> usize {
    let mut added = 0;
    for class in classes.iter().filter(|c| c.has_device_logic) {
        for (dir, name) in [
            (DEVICE_INCLUDE_DIR, class.device_header_name()),
            (DEVICE_SRC_DIR, class.device_body_name()),
        ] {
            let directory = manifest.directory_or_insert(dir);
            if directory.file(&name).is_none() {
                directory.add_file(name, FileFlags::required());
                added += 1;
            }
        }
    }
    tracing::debug!(added, "Added generated device files to manifest");
    added
}
