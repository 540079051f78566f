//! The fixed catalogs of generated test material.
//!
//! Raster documents span aspect ratios from 1:1 to 50:1 in both
//! orientations, plus a 4K page and a 64 px stamp. PDFs vary page count and
//! paper size, including a document that changes size on every page.

/// One raster document: `{id}.png`, exactly `width × height` pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentSpec {
    pub id: &'static str,
    pub width: u32,
    pub height: u32,
    pub desc: &'static str,
}

impl DocumentSpec {
    pub fn file_name(&self) -> String {
        format!("{}.png", self.id)
    }

    pub fn dimensions(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }

    /// `long / short` side ratio.
    pub fn aspect_ratio(&self) -> f64 {
        let (long, short) = (self.width.max(self.height), self.width.min(self.height));
        f64::from(long) / f64::from(short.max(1))
    }

    /// `H`orizontal, `V`ertical or `S`quare.
    pub fn orientation(&self) -> char {
        match self.width.cmp(&self.height) {
            std::cmp::Ordering::Greater => 'H',
            std::cmp::Ordering::Less => 'V',
            std::cmp::Ordering::Equal => 'S',
        }
    }
}

pub const DOCUMENTS: [DocumentSpec; 10] = [
    DocumentSpec {
        id: "01_long_receipt",
        width: 100,
        height: 2800,
        desc: "Supermarket receipt",
    },
    DocumentSpec {
        id: "02_wide_spreadsheet",
        width: 2800,
        height: 100,
        desc: "Employee database table",
    },
    DocumentSpec {
        id: "03_research_paper_a4",
        width: 595,
        height: 842,
        desc: "Two-column research paper",
    },
    DocumentSpec {
        id: "04_id_card_square",
        width: 512,
        height: 512,
        desc: "National ID card",
    },
    DocumentSpec {
        id: "05_narrow_invoice",
        width: 140,
        height: 2100,
        desc: "Narrow service invoice",
    },
    DocumentSpec {
        id: "06_panoramic_timeline",
        width: 3500,
        height: 70,
        desc: "Project timeline strip",
    },
    DocumentSpec {
        id: "07_mobile_form",
        width: 375,
        height: 812,
        desc: "Mobile registration form",
    },
    DocumentSpec {
        id: "08_financial_report_4k",
        width: 3840,
        height: 2160,
        desc: "Annual financial report (4K)",
    },
    DocumentSpec {
        id: "09_medical_prescription",
        width: 987,
        height: 610,
        desc: "Medical prescription",
    },
    DocumentSpec {
        id: "10_postage_stamp",
        width: 64,
        height: 64,
        desc: "Postage stamp (tiny)",
    },
];

/// Look a raster document up by id.
pub fn document(id: &str) -> Option<&'static DocumentSpec> {
    DOCUMENTS.iter().find(|d| d.id == id)
}

// ── Paper ────────────────────────────────────────────────────────────────

/// A page size in PDF points (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paper {
    pub label: &'static str,
    pub width: f32,
    pub height: f32,
}

impl Paper {
    pub const A4: Paper = Paper {
        label: "A4 Portrait",
        width: 595.2756,
        height: 841.8898,
    };
    pub const A3: Paper = Paper {
        label: "A3 Portrait",
        width: 841.8898,
        height: 1190.5512,
    };
    pub const LETTER: Paper = Paper {
        label: "Letter",
        width: 612.0,
        height: 792.0,
    };
    pub const LEGAL: Paper = Paper {
        label: "Legal",
        width: 612.0,
        height: 1008.0,
    };
    pub const RECEIPT_ROLL: Paper = Paper {
        label: "Thermal Roll",
        width: 220.0,
        height: 800.0,
    };

    pub const fn landscape(self, label: &'static str) -> Paper {
        Paper {
            label,
            width: self.height,
            height: self.width,
        }
    }

    pub const fn custom(label: &'static str, width: f32, height: f32) -> Paper {
        Paper {
            label,
            width,
            height,
        }
    }
}

/// The page sequence of the mixed-size PDF.
pub const MIXED_SIZES: [Paper; 10] = [
    Paper::A4,
    Paper::A4.landscape("A4 Landscape"),
    Paper::A3,
    Paper::LETTER,
    Paper::LEGAL,
    Paper::A4,
    Paper::A3.landscape("A3 Landscape"),
    Paper::custom("Custom Tall", 300.0, 1200.0),
    Paper::custom("Custom Wide", 1200.0, 400.0),
    Paper::A4,
];

// ── PDFs ─────────────────────────────────────────────────────────────────

/// Page geometry of a PDF.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PdfLayout {
    Uniform(Paper),
    Mixed(&'static [Paper]),
}

/// One multi-page PDF: `{id}.pdf`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfSpec {
    pub id: &'static str,
    pub pages: usize,
    pub layout: PdfLayout,
    pub desc: &'static str,
}

impl PdfSpec {
    pub fn file_name(&self) -> String {
        format!("{}.pdf", self.id)
    }

    /// Paper of a 0-based page.
    pub fn paper(&self, idx: usize) -> Paper {
        match self.layout {
            PdfLayout::Uniform(p) => p,
            PdfLayout::Mixed(seq) => seq.get(idx).copied().unwrap_or(Paper::A4),
        }
    }
}

pub const PDFS: [PdfSpec; 7] = [
    PdfSpec {
        id: "01_financial_report",
        pages: 15,
        layout: PdfLayout::Uniform(Paper::A4),
        desc: "A4 financial report with tables",
    },
    PdfSpec {
        id: "02_mixed_sizes",
        pages: 10,
        layout: PdfLayout::Mixed(&MIXED_SIZES),
        desc: "Mixed page sizes (A4/A3/Letter/Legal/Custom)",
    },
    PdfSpec {
        id: "03_long_contract",
        pages: 30,
        layout: PdfLayout::Uniform(Paper::A4),
        desc: "A4 legal contract",
    },
    PdfSpec {
        id: "04_receipt_roll",
        pages: 20,
        layout: PdfLayout::Uniform(Paper::RECEIPT_ROLL),
        desc: "Narrow thermal receipt pages",
    },
    PdfSpec {
        id: "05_presentation",
        pages: 25,
        layout: PdfLayout::Uniform(Paper::A4.landscape("A4 Landscape")),
        desc: "Landscape presentation slides",
    },
    PdfSpec {
        id: "06_technical_manual",
        pages: 50,
        layout: PdfLayout::Uniform(Paper::A4),
        desc: "A4 technical documentation",
    },
    PdfSpec {
        id: "07_accounting_ledger",
        pages: 12,
        layout: PdfLayout::Uniform(Paper::A3.landscape("A3 Landscape")),
        desc: "A3 landscape accounting ledger",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn document_ids_are_unique_and_ordered() {
        let ids: HashSet<_> = DOCUMENTS.iter().map(|d| d.id).collect();
        assert_eq!(ids.len(), DOCUMENTS.len());
        let mut sorted: Vec<_> = DOCUMENTS.iter().map(|d| d.id).collect();
        sorted.sort_unstable();
        assert_eq!(sorted, DOCUMENTS.iter().map(|d| d.id).collect::<Vec<_>>());
    }

    #[test]
    fn aspect_and_orientation() {
        let receipt = document("01_long_receipt").unwrap();
        assert_eq!(receipt.aspect_ratio(), 28.0);
        assert_eq!(receipt.orientation(), 'V');
        assert_eq!(document("06_panoramic_timeline").unwrap().orientation(), 'H');
        assert_eq!(document("04_id_card_square").unwrap().orientation(), 'S');
        assert!(document("99_missing").is_none());
    }

    #[test]
    fn pdf_catalog_totals() {
        assert_eq!(PDFS.iter().map(|p| p.pages).sum::<usize>(), 162);
        let mixed = PDFS.iter().find(|p| p.id == "02_mixed_sizes").unwrap();
        assert_eq!(mixed.pages, MIXED_SIZES.len());
        assert_eq!(mixed.paper(1).width, Paper::A4.height);
        assert_eq!(mixed.paper(7).height, 1200.0);
    }

    #[test]
    fn landscape_swaps_sides() {
        let l = Paper::A3.landscape("A3 Landscape");
        assert_eq!((l.width, l.height), (Paper::A3.height, Paper::A3.width));
    }
}
