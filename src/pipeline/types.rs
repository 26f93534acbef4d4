use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of data types a port or variable may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DataType {
    File,
    FileList,
    RemoteFile,
    RemoteFileList,
    String,
    StringList,
}

impl DataType {
    pub const ALL: [DataType; 6] = [
        DataType::File,
        DataType::FileList,
        DataType::RemoteFile,
        DataType::RemoteFileList,
        DataType::String,
        DataType::StringList,
    ];

    /// The wire name, e.g. `remote-file[]`.
    pub fn as_str(self) -> &'static str {
        match self {
            DataType::File => "file",
            DataType::FileList => "file[]",
            DataType::RemoteFile => "remote-file",
            DataType::RemoteFileList => "remote-file[]",
            DataType::String => "string",
            DataType::StringList => "string[]",
        }
    }

    /// List-typed variables carry arrays (the `[]` suffix).
    pub fn is_list(self) -> bool {
        matches!(
            self,
            DataType::FileList | DataType::RemoteFileList | DataType::StringList
        )
    }

    /// The element type of a list type, or the type itself for scalars.
    pub fn element(self) -> DataType {
        match self {
            DataType::FileList => DataType::File,
            DataType::RemoteFileList => DataType::RemoteFile,
            DataType::StringList => DataType::String,
            scalar => scalar,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or(())
    }
}

/// A type descriptor as written in a document.
///
/// Unrecognized names are kept verbatim so the validator can report them
/// instead of the parser rejecting the whole pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TypeTag {
    Known(DataType),
    Unknown(String),
}

impl TypeTag {
    pub fn known(&self) -> Option<DataType> {
        match self {
            TypeTag::Known(t) => Some(*t),
            TypeTag::Unknown(_) => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, TypeTag::Known(_))
    }

    /// Unknown names ending in `[]` still count as lists.
    pub fn is_list(&self) -> bool {
        match self {
            TypeTag::Known(t) => t.is_list(),
            TypeTag::Unknown(name) => name.ends_with("[]"),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TypeTag::Known(t) => t.as_str(),
            TypeTag::Unknown(name) => name,
        }
    }
}

impl From<DataType> for TypeTag {
    fn from(t: DataType) -> Self {
        TypeTag::Known(t)
    }
}

impl From<String> for TypeTag {
    fn from(name: String) -> Self {
        match name.parse::<DataType>() {
            Ok(t) => TypeTag::Known(t),
            Err(()) => TypeTag::Unknown(name),
        }
    }
}

impl From<&str> for TypeTag {
    fn from(name: &str) -> Self {
        TypeTag::from(name.to_string())
    }
}

impl From<TypeTag> for String {
    fn from(tag: TypeTag) -> Self {
        match tag {
            TypeTag::Known(t) => t.as_str().to_string(),
            TypeTag::Unknown(name) => name,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
