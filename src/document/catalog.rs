use image::Rgb;

use crate::pendaftar::sampler::OptionSet;

/// Background for document types outside the catalog.
pub const FALLBACK_COLOR: Rgb<u8> = Rgb([100, 100, 100]);

/// The files an applicant uploads with their registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Foto,
    Ijazah,
    Akta,
    Kk,
    Bpjs,
}

impl OptionSet for DocumentKind {
    const ALL: &'static [Self] = &[
        DocumentKind::Foto,
        DocumentKind::Ijazah,
        DocumentKind::Akta,
        DocumentKind::Kk,
        DocumentKind::Bpjs,
    ];

    fn as_str(&self) -> &'static str {
        self.key()
    }
}

impl DocumentKind {
    pub const REQUIRED: [DocumentKind; 4] = [
        DocumentKind::Foto,
        DocumentKind::Ijazah,
        DocumentKind::Akta,
        DocumentKind::Kk,
    ];

    /// Storage key, also used as the filename prefix.
    pub fn key(&self) -> &'static str {
        match self {
            DocumentKind::Foto => "foto",
            DocumentKind::Ijazah => "ijazah",
            DocumentKind::Akta => "akta",
            DocumentKind::Kk => "kk",
            DocumentKind::Bpjs => "bpjs",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::Foto => "Pas Foto",
            DocumentKind::Ijazah => "Ijazah",
            DocumentKind::Akta => "Akta Kelahiran",
            DocumentKind::Kk => "Kartu Keluarga",
            DocumentKind::Bpjs => "BPJS (Opsional)",
        }
    }

    pub fn color(&self) -> Rgb<u8> {
        match self {
            DocumentKind::Foto => Rgb([76, 175, 80]),
            DocumentKind::Ijazah => Rgb([33, 150, 243]),
            DocumentKind::Akta => Rgb([255, 152, 0]),
            DocumentKind::Kk => Rgb([156, 39, 176]),
            DocumentKind::Bpjs => Rgb([0, 150, 136]),
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, DocumentKind::Bpjs)
    }
}

/// Label and color a placeholder is drawn with.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentStyle {
    pub label: String,
    pub color: Rgb<u8>,
}

impl DocumentStyle {
    /// Unknown types get their uppercased name on a gray background.
    pub fn for_type(file_type: &str) -> Self {
        match DocumentKind::from_label(file_type) {
            Some(kind) => Self {
                label: kind.label().to_string(),
                color: kind.color(),
            },
            None => Self {
                label: file_type.to_uppercase(),
                color: FALLBACK_COLOR,
            },
        }
    }
}
