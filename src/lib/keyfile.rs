// SPDX-License-Identifier: Apache-2.0

use std::fs::OpenOptions;
use std::io::Write;
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::Path;

use crate::{ErrorKind, NmcError};

/// NetworkManager refuses to load profiles readable by others.
pub(crate) const CONNECTION_FILE_MODE: u32 = 0o600;

#[derive(Debug, Clone, PartialEq, Eq)]
enum LineKind {
    // Blank line or comment
    Other,
    Section(String),
    Entry {
        key: String,
        // Byte range of the value inside `KeyFileLine::raw`
        value_start: usize,
        value_end: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct KeyFileLine {
    // Original text including line ending
    raw: String,
    kind: LineKind,
}

impl KeyFileLine {
    fn value(&self) -> Option<&str> {
        if let LineKind::Entry {
            value_start,
            value_end,
            ..
        } = &self.kind
        {
            Some(&self.raw[*value_start..*value_end])
        } else {
            None
        }
    }

    fn key(&self) -> Option<&str> {
        if let LineKind::Entry { key, .. } = &self.kind {
            Some(key.as_str())
        } else {
            None
        }
    }

    fn set_value(&mut self, value: &str) {
        if let LineKind::Entry {
            value_start,
            value_end,
            ..
        } = &mut self.kind
        {
            self.raw.replace_range(*value_start..*value_end, value);
            *value_end = *value_start + value.len();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// NetworkManager keyfile (`*.nmconnection`) connection profile.
///
/// Every line is kept as read, only the values changed through this type
/// are rewritten. Saving an untouched profile reproduces the source byte
/// for byte.
pub struct NmKeyFile {
    lines: Vec<KeyFileLine>,
}

impl NmKeyFile {
    pub fn parse(content: &str) -> Result<Self, NmcError> {
        let mut lines = Vec::new();
        let mut in_section = false;
        for (index, raw) in content.split_inclusive('\n').enumerate() {
            let body = raw.trim_end_matches(['\n', '\r']);
            let trimmed = body.trim();
            let kind = if trimmed.is_empty()
                || trimmed.starts_with('#')
                || trimmed.starts_with(';')
            {
                LineKind::Other
            } else if let Some(rest) = trimmed.strip_prefix('[') {
                let name = rest.strip_suffix(']').map(str::trim).ok_or_else(
                    || invalid_line(index, "unterminated section header"),
                )?;
                if name.is_empty() {
                    return Err(invalid_line(index, "empty section name"));
                }
                in_section = true;
                LineKind::Section(name.to_string())
            } else if let Some(eq) = body.find('=') {
                let key = body[..eq].trim();
                if key.is_empty() {
                    return Err(invalid_line(index, "empty key"));
                }
                if !in_section {
                    return Err(invalid_line(
                        index,
                        "key defined before any section",
                    ));
                }
                let after = &body[eq + 1..];
                let value_start =
                    eq + 1 + (after.len() - after.trim_start().len());
                LineKind::Entry {
                    key: key.to_string(),
                    value_start,
                    value_end: value_start + after.trim().len(),
                }
            } else {
                return Err(invalid_line(index, "expecting key=value"));
            };
            lines.push(KeyFileLine {
                raw: raw.to_string(),
                kind,
            });
        }
        Ok(Self { lines })
    }

    pub fn load(path: &Path) -> Result<Self, NmcError> {
        let bytes = std::fs::read(path)
            .map_err(|e| NmcError::io("read profile", path, e))?;
        let content = String::from_utf8(bytes).map_err(|e| {
            NmcError::new(
                ErrorKind::InvalidProfile,
                format!("Profile {} is not valid UTF-8: {e}", path.display()),
            )
        })?;
        Self::parse(&content).map_err(|e| {
            NmcError::new(e.kind, format!("{}: {}", path.display(), e.msg))
        })
    }

    /// Write the profile and restrict its permission to owner read/write,
    /// also when the file existed before with broader permission.
    pub fn save(&self, path: &Path) -> Result<(), NmcError> {
        write_private_file(path, self.to_string().as_bytes())
    }

    /// Section names in file order.
    pub fn sections(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter_map(|l| match &l.kind {
                LineKind::Section(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Key and value pairs of specified section in file order.
    pub fn entries(&self, section: &str) -> Vec<(&str, &str)> {
        self.section_lines(section)
            .filter_map(|(_, l)| l.key().zip(l.value()))
            .collect()
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section_lines(section)
            .filter(|(_, l)| l.key() == Some(key))
            .last()
            .and_then(|(_, l)| l.value())
    }

    /// Change the value of an existing key, return false if not found.
    pub fn set(&mut self, section: &str, key: &str, value: &str) -> bool {
        let indexes: Vec<usize> = self
            .section_lines(section)
            .filter(|(_, l)| l.key() == Some(key))
            .map(|(i, _)| i)
            .collect();
        for i in indexes.iter() {
            self.lines[*i].set_value(value);
        }
        !indexes.is_empty()
    }

    /// Replace every value exactly equal to `old` with `new` regardless of
    /// section or key. Return the number of values changed.
    pub fn replace_value(&mut self, old: &str, new: &str) -> usize {
        let mut count = 0;
        for line in self.lines.iter_mut() {
            if line.value() == Some(old) {
                line.set_value(new);
                count += 1;
            }
        }
        count
    }

    fn section_lines<'a, 'b>(
        &'a self,
        section: &'b str,
    ) -> impl Iterator<Item = (usize, &'a KeyFileLine)> + 'b
    where
        'a: 'b,
    {
        let mut cur_section: Option<&'a str> = None;
        self.lines.iter().enumerate().filter(move |&(_, l)| {
            if let LineKind::Section(name) = &l.kind {
                cur_section = Some(name.as_str());
                false
            } else {
                cur_section == Some(section)
            }
        })
    }
}

impl std::fmt::Display for NmKeyFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in self.lines.iter() {
            write!(f, "{}", line.raw)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for NmKeyFile {
    type Err = NmcError;

    fn from_str(s: &str) -> Result<Self, NmcError> {
        Self::parse(s)
    }
}

fn invalid_line(index: usize, reason: &str) -> NmcError {
    NmcError::new(
        ErrorKind::InvalidProfile,
        format!("line {}: {reason}", index + 1),
    )
}

pub(crate) fn write_private_file(
    path: &Path,
    content: &[u8],
) -> Result<(), NmcError> {
    let mut fd = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .mode(CONNECTION_FILE_MODE)
        .open(path)
        .map_err(|e| NmcError::io("open", path, e))?;
    fd.write_all(content)
        .map_err(|e| NmcError::io("write", path, e))?;
    std::fs::set_permissions(
        path,
        std::fs::Permissions::from_mode(CONNECTION_FILE_MODE),
    )
    .map_err(|e| NmcError::io("change permission of", path, e))
}
