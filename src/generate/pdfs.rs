//! Layouts of the seven multi-page PDFs, drawn with pdfium page objects.
//!
//! Coordinates are PDF points with the origin at the bottom-left corner.
//! Text uses the built-in Helvetica / Courier faces, so it is kept ASCII.

use crate::catalog::{Paper, PdfSpec};
use pdfium_render::prelude::*;
use std::path::Path;

const BLUE: u32 = 0x1565C0;
const NAVY: u32 = 0x0D47A1;
const INK: u32 = 0x212121;

type Drawn<T = ()> = Result<T, PdfiumError>;

fn color(hex: u32) -> PdfColor {
    PdfColor::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 255)
}

/// Built-in faces of one document.
#[derive(Clone, Copy)]
struct Faces {
    regular: PdfFontToken,
    bold: PdfFontToken,
    mono: PdfFontToken,
}

/// Drawing helpers over one page.
struct Painter<'p, 'a> {
    page: &'p mut PdfPage<'a>,
    faces: Faces,
    w: f32,
    h: f32,
}

impl<'p, 'a> Painter<'p, 'a> {
    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, fill: u32) -> Drawn {
        self.page.objects_mut().create_path_object_rect(
            PdfRect::new_from_values(y, x, y + h, x + w),
            None,
            None,
            Some(color(fill)),
        )?;
        Ok(())
    }

    fn frame(&mut self, x: f32, y: f32, w: f32, h: f32, stroke: u32, width: f32) -> Drawn {
        self.page.objects_mut().create_path_object_rect(
            PdfRect::new_from_values(y, x, y + h, x + w),
            Some(color(stroke)),
            Some(PdfPoints::new(width)),
            None,
        )?;
        Ok(())
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, stroke: u32, width: f32) -> Drawn {
        self.page.objects_mut().create_path_object_line(
            PdfPoints::new(x1),
            PdfPoints::new(y1),
            PdfPoints::new(x2),
            PdfPoints::new(y2),
            color(stroke),
            PdfPoints::new(width),
        )?;
        Ok(())
    }

    fn text_with(
        &mut self,
        x: f32,
        y: f32,
        text: &str,
        font: PdfFontToken,
        size: f32,
        fill: u32,
    ) -> Drawn {
        let mut object = self.page.objects_mut().create_text_object(
            PdfPoints::new(x),
            PdfPoints::new(y),
            text,
            font,
            PdfPoints::new(size),
        )?;
        object.set_fill_color(color(fill))?;
        Ok(())
    }

    fn text(&mut self, x: f32, y: f32, text: &str, size: f32, fill: u32) -> Drawn {
        self.text_with(x, y, text, self.faces.regular, size, fill)
    }

    fn bold(&mut self, x: f32, y: f32, text: &str, size: f32, fill: u32) -> Drawn {
        self.text_with(x, y, text, self.faces.bold, size, fill)
    }

    fn mono(&mut self, x: f32, y: f32, text: &str, size: f32, fill: u32) -> Drawn {
        self.text_with(x, y, text, self.faces.mono, size, fill)
    }

    fn text_right(&mut self, x: f32, y: f32, text: &str, size: f32, fill: u32) -> Drawn {
        self.text(x - approx_width(text, size), y, text, size, fill)
    }

    fn bold_center(&mut self, cx: f32, y: f32, text: &str, size: f32, fill: u32) -> Drawn {
        self.bold(cx - approx_width(text, size) / 2.0, y, text, size, fill)
    }

    fn text_center(&mut self, cx: f32, y: f32, text: &str, size: f32, fill: u32) -> Drawn {
        self.text(cx - approx_width(text, size) / 2.0, y, text, size, fill)
    }

    /// Blue title bar with `Page n/N`, grey footer.
    fn header_footer(&mut self, title: &str, page: usize, total: usize) -> Drawn {
        let (w, h) = (self.w, self.h);
        self.rect(0.0, h - 40.0, w, 40.0, BLUE)?;
        self.bold(15.0, h - 28.0, title, 12.0, 0xFFFFFF)?;
        self.text_right(w - 15.0, h - 28.0, &format!("Page {page}/{total}"), 9.0, 0xFFFFFF)?;
        self.rect(0.0, 0.0, w, 25.0, 0xECEFF1)?;
        self.text(15.0, 9.0, "NaViT Stress Test - Multi-Page PDF", 7.0, 0x78909C)?;
        self.text_right(w - 15.0, 9.0, "Generated 2026-02-12", 7.0, 0x78909C)
    }

    /// Table with a coloured header row and zebra body rows.
    fn table(
        &mut self,
        x: f32,
        top: f32,
        widths: &[f32],
        rows: &[Vec<String>],
        size: f32,
        head: u32,
    ) -> Drawn<f32> {
        let row_h = size + 6.0;
        let total_w: f32 = widths.iter().sum();
        let mut y = top;
        for (r, cells) in rows.iter().enumerate() {
            y -= row_h;
            if r == 0 {
                self.rect(x, y, total_w, row_h, head)?;
            } else if r % 2 == 0 {
                self.rect(x, y, total_w, row_h, 0xF5F5F5)?;
            }
            let mut cx = x;
            for (cell, cw) in cells.iter().zip(widths) {
                if r == 0 {
                    self.bold(cx + 3.0, y + 4.0, cell, size, 0xFFFFFF)?;
                } else {
                    self.text(cx + 3.0, y + 4.0, cell, size, INK)?;
                }
                cx += cw;
            }
            self.line(x, y, x + total_w, y, 0xBDBDBD, 0.4)?;
        }
        Ok(y)
    }
}

/// Rough Helvetica advance, enough to right-align and centre decoration.
fn approx_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.52
}

fn paper_size(paper: Paper) -> PdfPagePaperSize {
    PdfPagePaperSize::Custom(PdfPoints::new(paper.width), PdfPoints::new(paper.height))
}

/// Build `spec` and save it to `path`. Returns the number of pages written.
pub fn write_pdf(pdfium: &Pdfium, spec: &PdfSpec, path: &Path) -> Result<usize, PdfiumError> {
    let mut document = pdfium.create_new_pdf()?;
    let faces = Faces {
        regular: document.fonts_mut().helvetica(),
        bold: document.fonts_mut().helvetica_bold(),
        mono: document.fonts_mut().courier(),
    };

    for idx in 0..spec.pages {
        let paper = spec.paper(idx);
        let mut page = document.pages_mut().create_page_at_end(paper_size(paper))?;
        let mut p = Painter {
            page: &mut page,
            faces,
            w: paper.width,
            h: paper.height,
        };
        let n = idx + 1;
        match spec.id {
            "01_financial_report" => financial_report_page(&mut p, n, spec.pages)?,
            "02_mixed_sizes" => mixed_size_page(&mut p, paper, n, spec.pages)?,
            "03_long_contract" => contract_page(&mut p, n, spec.pages)?,
            "04_receipt_roll" => receipt_page(&mut p, n, spec.pages)?,
            "05_presentation" => slide_page(&mut p, n, spec.pages)?,
            "06_technical_manual" => manual_page(&mut p, n, spec.pages)?,
            "07_accounting_ledger" => ledger_page(&mut p, n, spec.pages)?,
            _ => p.header_footer(spec.desc, n, spec.pages)?,
        }
    }

    let written = document.pages().len() as usize;
    document.save_to_file(path)?;
    Ok(written)
}

// ── Page layouts ─────────────────────────────────────────────────────────

fn financial_report_page(p: &mut Painter<'_, '_>, n: usize, total: usize) -> Drawn {
    p.header_footer("RAPPORT FINANCIER ANNUEL 2025", n, total)?;
    let (w, h) = (p.w, p.h);
    let mut y = h - 70.0;

    match n {
        1 => {
            p.rect(50.0, h / 2.0 - 50.0, w - 100.0, 120.0, NAVY)?;
            p.bold_center(w / 2.0, h / 2.0 + 30.0, "GROUPE BENALI", 28.0, 0xFFFFFF)?;
            p.text_center(w / 2.0, h / 2.0, "Rapport Financier Annuel", 18.0, 0xFFFFFF)?;
            p.bold_center(w / 2.0, h / 2.0 - 30.0, "Exercice 2025", 14.0, 0xFFFFFF)?;
            let place = "Direction Financiere - Casablanca, Maroc";
            p.text_center(w / 2.0, 200.0, place, 10.0, 0x333333)?;
            p.text_center(w / 2.0, 185.0, "Date: Fevrier 2026 | Confidentiel", 10.0, 0x333333)?;
        }
        2 => {
            p.bold(50.0, y, "Table des Matieres", 16.0, BLUE)?;
            y -= 30.0;
            let toc = [
                "Resume Executif", "Faits Marquants 2025", "Compte de Resultat Consolide",
                "Bilan Consolide", "Flux de Tresorerie", "Analyse par Segment",
                "Indicateurs de Performance", "Evolution Trimestrielle", "Ressources Humaines",
                "Investissements", "Gestion des Risques", "Perspectives 2026", "Annexes Comptables",
            ];
            for (i, item) in toc.iter().enumerate() {
                p.text(70.0, y, &format!("{}. {item}", i + 1), 11.0, INK)?;
                p.text_right(w - 70.0, y, &format!("......... {}", i + 3), 11.0, INK)?;
                y -= 22.0;
            }
        }
        3..=5 => {
            let sections = ["Resume Executif", "Faits Marquants", "Performance Globale"];
            p.bold(50.0, y, &format!("{}. {}", n - 2, sections[n - 3]), 14.0, BLUE)?;
            y -= 25.0;
            let paragraphs = [
                "L'exercice 2025 a ete marque par une forte croissance des indicateurs.",
                "Le chiffre d'affaires consolide a atteint 2,4 milliards MAD (+18,5%).",
                "Le resultat net part du groupe s'est etabli a 340 millions MAD (+22%).",
                "Le ratio d'endettement net s'est ameliore a 1,8x l'EBITDA contre 2,1x en 2024.",
                "Les investissements ont augmente de 36,8% pour atteindre 520 millions MAD.",
                "L'effectif total du Groupe a progresse a 4 850 collaborateurs.",
            ];
            for para in paragraphs {
                p.text(50.0, y, para, 10.0, INK)?;
                y -= 22.0;
            }
        }
        6..=10 => {
            let titles = [
                "Compte de Resultat",
                "Bilan Actif",
                "Bilan Passif",
                "Flux de Tresorerie",
                "Analyse par Segment",
            ];
            p.bold(50.0, y, titles[n - 6], 14.0, BLUE)?;
            y -= 25.0;
            let items = [
                ("Chiffre d'affaires", "2 400", "2 025", "+18.5%"),
                ("Cout des ventes", "1 560", "1 357", "+14.9%"),
                ("Marge brute", "840", "668", "+25.7%"),
                ("Charges d'exploitation", "360", "273", "+31.9%"),
                ("Resultat d'exploitation", "480", "395", "+21.5%"),
                ("Resultat financier", "-40", "-45", "-11.1%"),
                ("Resultat avant impot", "440", "350", "+25.7%"),
                ("Impot sur les societes", "100", "71", "+40.8%"),
                ("Resultat net", "340", "279", "+21.9%"),
                ("EBITDA", "600", "493", "+21.7%"),
            ];
            let rows: Vec<Vec<String>> = std::iter::once(("Indicateur", "2025", "2024", "Var %"))
                .chain(items)
                .map(|(a, b, c, d)| {
                    vec![a.to_string(), b.to_string(), c.to_string(), d.to_string()]
                })
                .collect();
            p.table(50.0, y, &[200.0, 100.0, 100.0, 80.0], &rows, 9.0, BLUE)?;
        }
        _ => {
            let sections = [
                "Indicateurs KPI",
                "Evolution Trimestrielle",
                "Ressources Humaines",
                "Investissements R&D",
                "Perspectives 2026",
            ];
            p.bold(50.0, y, sections[(n - 11) % sections.len()], 14.0, BLUE)?;
            y -= 25.0;
            for i in 1..=15 {
                let line = format!("- Point d'analyse {i}: resultat de l'indicateur du trimestre");
                p.text(60.0, y, &line, 10.0, INK)?;
                y -= 16.0;
            }
        }
    }
    Ok(())
}

fn mixed_size_page(p: &mut Painter<'_, '_>, paper: Paper, n: usize, total: usize) -> Drawn {
    p.header_footer(&format!("MIXED SIZES - {}", paper.label), n, total)?;
    let (w, h) = (p.w, p.h);
    let mut y = h - 80.0;

    p.rect(50.0, y - 80.0, w - 100.0, 80.0, 0xE3F2FD)?;
    p.bold(70.0, y - 25.0, &format!("Page Size: {}", paper.label), 14.0, BLUE)?;
    p.text(
        70.0,
        y - 45.0,
        &format!("Dimensions: {w:.0} x {h:.0} points ({:.1}\" x {:.1}\")", w / 72.0, h / 72.0),
        11.0,
        BLUE,
    )?;
    p.text(
        70.0,
        y - 65.0,
        &format!(
            "Pixels at 150 DPI: {} x {}",
            (w * 150.0 / 72.0) as u32,
            (h * 150.0 / 72.0) as u32
        ),
        11.0,
        BLUE,
    )?;
    y -= 120.0;

    let lines = (((y - 40.0) / 14.0).max(0.0) as usize).min(40);
    for i in 1..=lines {
        let line = format!(
            "Line {i}: Content for NaViT stress test on {} page ({w:.0}x{h:.0}pt)",
            paper.label
        );
        p.text(50.0, y, &line, 9.0, INK)?;
        y -= 14.0;
    }
    Ok(())
}

fn contract_page(p: &mut Painter<'_, '_>, n: usize, total: usize) -> Drawn {
    const ARTICLES: [&str; 30] = [
        "Objet du Contrat", "Duree et Renouvellement", "Prix et Modalites de Paiement",
        "Obligations du Prestataire", "Obligations du Client", "Propriete Intellectuelle",
        "Confidentialite", "Protection des Donnees", "Responsabilite et Garanties",
        "Force Majeure", "Resiliation", "Sous-Traitance", "Non-Sollicitation", "Assurances",
        "Conformite Reglementaire", "Audit et Controle", "Communication",
        "Transfert de Competences", "Gouvernance du Contrat", "Penalites et Bonus",
        "Modifications et Avenants", "Droit Applicable", "Juridiction Competente",
        "Notifications", "Dispositions Generales", "Annexe A: SLA", "Annexe B: Livrables",
        "Annexe C: Equipe Projet", "Annexe D: Plan de Transition", "Signatures",
    ];

    p.header_footer("CONTRAT DE PRESTATION DE SERVICES IT", n, total)?;
    let (w, h) = (p.w, p.h);
    let mut y = h - 70.0;

    if n == 1 {
        p.bold_center(w / 2.0, y, "CONTRAT DE PRESTATION", 20.0, BLUE)?;
        y -= 25.0;
        p.bold_center(w / 2.0, y, "DE SERVICES INFORMATIQUES", 16.0, BLUE)?;
        y -= 40.0;
        let parties = [
            "ENTRE LES SOUSSIGNES:",
            "TECH SOLUTIONS SARL, au capital de 5.000.000 MAD, RC 123456,",
            "45 Boulevard Zerktouni, 20000 Casablanca, Maroc,",
            "ci-apres denommee << le Prestataire >>, D'UNE PART,",
            "ET:",
            "GROUPE INDUSTRIEL ABC SA, au capital de 50.000.000 MAD, RC 789012,",
            "10 Avenue Hassan II, 10000 Rabat, Maroc,",
            "ci-apres denommee << le Client >>, D'AUTRE PART.",
        ];
        for line in parties {
            p.text(60.0, y, line, 11.0, INK)?;
            y -= 24.0;
        }
        return Ok(());
    }

    if n == total {
        p.bold(50.0, y, "Article 30 - Signatures", 14.0, BLUE)?;
        for (i, party) in ["Pour le Prestataire", "Pour le Client"].iter().enumerate() {
            let x = 60.0 + i as f32 * (w / 2.0);
            p.text(x, y - 60.0, party, 11.0, INK)?;
            p.frame(x, y - 180.0, w / 2.0 - 100.0, 100.0, 0x9E9E9E, 0.8)?;
        }
        return Ok(());
    }

    p.bold(50.0, y, &format!("Article {n} - {}", ARTICLES[n - 1]), 14.0, BLUE)?;
    y -= 28.0;
    for clause in 1..=4 {
        p.bold(50.0, y, &format!("{n}.{clause}"), 10.0, INK)?;
        for k in 0..8 {
            let text = if k % 3 == 2 {
                "conformement aux dispositions du present contrat et de ses annexes."
            } else {
                "Les Parties conviennent que les obligations du present article s'appliquent"
            };
            p.text(80.0, y, text, 10.0, INK)?;
            y -= 14.0;
        }
        y -= 12.0;
        if y < 80.0 {
            break;
        }
    }
    Ok(())
}

fn receipt_page(p: &mut Painter<'_, '_>, n: usize, total: usize) -> Drawn {
    const ITEMS: [(&str, &str); 20] = [
        ("Pain complet", "8.50"), ("Lait 1L", "7.90"), ("Oeufs x12", "15.00"),
        ("Huile olive", "45.00"), ("Tomates 1kg", "12.00"), ("Poulet", "55.00"),
        ("Riz 1kg", "14.00"), ("Sucre 1kg", "8.50"), ("The vert", "22.00"),
        ("Beurre", "18.00"), ("Fromage", "12.50"), ("Yaourt x4", "16.00"),
        ("Eau 1.5L", "5.00"), ("Jus orange", "15.00"), ("Bananes", "14.00"),
        ("Cafe 250g", "35.00"), ("Chocolat", "20.00"), ("Biscuits", "18.50"),
        ("Miel 500g", "45.00"), ("Sardines", "24.00"),
    ];

    let (w, h) = (p.w, p.h);
    p.rect(0.0, 0.0, w, h, 0xFFFEF5)?;
    let mut y = h - 20.0;
    p.bold_center(w / 2.0, y, "SUPERMARCHE CENTRAL", 10.0, 0x000000)?;
    y -= 12.0;
    p.text_center(w / 2.0, y, &format!("Ticket #{n:04} - Caisse {}", n % 5 + 1), 7.0, 0x000000)?;
    y -= 10.0;
    p.text_center(w / 2.0, y, "06/02/2026 14:32", 7.0, 0x000000)?;
    y -= 15.0;
    p.line(10.0, y, w - 10.0, y, 0x999999, 0.5)?;
    y -= 15.0;

    let start = ((n - 1) * 3) % ITEMS.len();
    let count = (((y - 80.0) / 10.0).max(0.0) as usize).min(ITEMS.len());
    let mut amount = 0.0;
    for i in 0..count {
        let (name, price) = ITEMS[(start + i) % ITEMS.len()];
        amount += price.parse::<f64>().unwrap_or(0.0);
        p.text(10.0, y, name, 7.0, 0x000000)?;
        p.text_right(w - 10.0, y, price, 7.0, 0x000000)?;
        y -= 10.0;
    }

    y -= 5.0;
    p.line(10.0, y, w - 10.0, y, 0x999999, 0.5)?;
    y -= 12.0;
    p.bold(10.0, y, "TOTAL TTC:", 8.0, 0x000000)?;
    p.text_right(w - 10.0, y, &format!("{:.2} MAD", amount * 1.2), 8.0, 0x000000)?;
    y -= 20.0;
    p.text_center(w / 2.0, y, "Merci de votre visite!", 6.0, 0x000000)?;
    p.text_center(w / 2.0, 10.0, &format!("Page {n}/{total}"), 6.0, 0x000000)
}

fn slide_page(p: &mut Painter<'_, '_>, n: usize, total: usize) -> Drawn {
    const SLIDES: [&str; 25] = [
        "Transformation Digitale 2026", "Agenda", "Contexte & Enjeux", "Vision Strategique",
        "Diagnostic IT Actuel", "Architecture Cible", "Feuille de Route",
        "Phase 1: Infrastructure Cloud", "Phase 2: Data & IA", "Phase 3: Applications Metier",
        "Budget Previsionnel", "ROI Attendu", "Risques & Mitigation", "Equipe Projet",
        "Gouvernance", "KPIs & Tableau de Bord", "Cas d'Usage IA", "Architecture Microservices",
        "Plan de Formation", "Change Management", "Timeline Detaillee",
        "Quick Wins vs Long Terme", "Benchmark Concurrentiel", "Questions & Discussion",
        "Contacts & Prochaines Etapes",
    ];
    const BACKGROUNDS: [u32; 10] = [
        0x1565C0, 0x0D47A1, 0x283593, 0x1A237E, 0x004D40, 0x1B5E20, 0xE65100, 0xBF360C,
        0x4A148C, 0x880E4F,
    ];

    let (w, h) = (p.w, p.h);
    let accent = BACKGROUNDS[(n - 1) % BACKGROUNDS.len()];

    if n == 1 {
        p.rect(0.0, 0.0, w, h, accent)?;
        p.bold_center(w / 2.0, h / 2.0 + 30.0, "TRANSFORMATION DIGITALE", 32.0, 0xFFFFFF)?;
        p.text_center(w / 2.0, h / 2.0 - 10.0, "Plan Strategique 2026-2028", 20.0, 0xFFFFFF)?;
        return p.text_center(w / 2.0, 40.0, &format!("{n}/{total}"), 10.0, 0xFFFFFF);
    }

    p.rect(0.0, h - 70.0, w, 70.0, accent)?;
    p.bold(40.0, h - 45.0, SLIDES[(n - 1) % SLIDES.len()], 24.0, 0xFFFFFF)?;
    p.text_right(w - 40.0, 20.0, &format!("{n}/{total}"), 10.0, 0x757575)?;

    if n % 3 == 2 {
        let header = ["Axe", "T1", "T2", "T3", "T4", "Total"].map(String::from).to_vec();
        let axes = ["Cloud", "Data", "Applications", "Securite", "Formation"];
        let body = axes.iter().enumerate().map(|(i, name)| {
            let q: Vec<u32> = (0..4).map(|k| 40 + ((n + i * 7 + k * 13) % 60) as u32).collect();
            let mut row = vec![name.to_string()];
            row.extend(q.iter().map(|v| format!("{v}K")));
            row.push(format!("{}K", q.iter().sum::<u32>()));
            row
        });
        let rows: Vec<Vec<String>> = std::iter::once(header).chain(body).collect();
        let widths = [200.0, 100.0, 100.0, 100.0, 100.0, 120.0];
        p.table(60.0, h - 110.0, &widths, &rows, 14.0, accent)?;
    } else {
        let mut y = h - 120.0;
        for i in 1..=6 {
            p.rect(60.0, y + 3.0, 8.0, 8.0, accent)?;
            let point = format!("Point cle {i} - objectif mesurable et responsable identifie");
            p.text(80.0, y, &point, 16.0, INK)?;
            y -= 50.0;
        }
    }
    Ok(())
}

fn manual_page(p: &mut Painter<'_, '_>, n: usize, total: usize) -> Drawn {
    const CHAPTERS: [&str; 15] = [
        "Installation", "Configuration", "Architecture", "API Reference", "Authentication",
        "Database Schema", "REST Endpoints", "WebSocket API", "Error Handling", "Testing",
        "Deployment", "Monitoring", "Troubleshooting", "Performance Tuning", "Security",
    ];
    const CODE: [&str; 14] = [
        "use axum::{routing::post, Json, Router};",
        "",
        "#[derive(Deserialize)]",
        "struct Document {",
        "    id: String,",
        "    title: String,",
        "    pages: u32,",
        "}",
        "",
        "async fn create(Json(doc): Json<Document>) -> StatusCode {",
        "    store.insert(doc).await;",
        "    StatusCode::CREATED",
        "}",
        "",
    ];

    p.header_footer("MANUEL TECHNIQUE - API Platform v3.2", n, total)?;
    let (w, h) = (p.w, p.h);

    if n == 1 {
        p.bold_center(w / 2.0, h / 2.0 + 40.0, "API PLATFORM v3.2", 24.0, BLUE)?;
        p.text_center(w / 2.0, h / 2.0, "Manuel Technique & Documentation API", 16.0, 0x333333)?;
        let version = "Version 3.2.1 - Fevrier 2026";
        return p.text_center(w / 2.0, h / 2.0 - 40.0, version, 11.0, 0x333333);
    }

    let chapter = ((n - 2) / 3) % CHAPTERS.len();
    let mut y = h - 70.0;
    p.bold(50.0, y, &format!("Chapitre {}: {}", chapter + 1, CHAPTERS[chapter]), 14.0, BLUE)?;
    y -= 30.0;

    if n % 3 == 0 {
        p.rect(50.0, y - 200.0, w - 100.0, 200.0, 0x263238)?;
        let mut cy = y - 18.0;
        for line in CODE {
            p.mono(62.0, cy, line, 8.0, 0x80CBC4)?;
            cy -= 13.0;
        }
        y -= 230.0;
    }

    while y > 60.0 {
        let prose = "Chaque endpoint valide sa requete puis renvoie un code HTTP explicite.";
        p.text(50.0, y, prose, 10.0, INK)?;
        y -= 15.0;
        if (y as i32) % 7 == 0 {
            y -= 10.0;
        }
    }
    Ok(())
}

fn ledger_page(p: &mut Painter<'_, '_>, n: usize, total: usize) -> Drawn {
    const MONTHS: [&str; 12] = [
        "Janvier", "Fevrier", "Mars", "Avril", "Mai", "Juin", "Juillet", "Aout", "Septembre",
        "Octobre", "Novembre", "Decembre",
    ];
    const ACCOUNTS: [&str; 7] = ["6110", "6120", "6130", "7010", "7020", "4411", "5141"];

    let month = MONTHS[(n - 1) % MONTHS.len()];
    p.header_footer(&format!("GRAND LIVRE COMPTABLE - {month} 2025"), n, total)?;

    let header = [
        "Date", "N. Piece", "Compte", "Libelle", "Debit", "Credit", "Solde", "TVA", "Devise", "Ref",
    ];
    let mut rows = vec![header.map(String::from).to_vec()];
    let mut balance: i64 = 1_000_000;
    for day in 1..=28usize {
        let seed = (n * 31 + day * 17) as i64;
        let value = 1_000 + (seed * 7919) % 49_000;
        let is_debit = seed % 5 < 3;
        balance += if is_debit { -value } else { value };
        let account = ACCOUNTS[(n + day) % ACCOUNTS.len()];
        rows.push(vec![
            format!("{day:02}/{n:02}/25"),
            format!("PJ-{n:02}{day:02}"),
            account.to_string(),
            format!("Operation {account} - {}", &month[..3]),
            if is_debit { value.to_string() } else { String::new() },
            if is_debit { String::new() } else { value.to_string() },
            balance.to_string(),
            (value / 5).to_string(),
            "MAD".to_string(),
            format!("R-{n:02}{day:02}"),
        ]);
    }

    let widths = [65.0, 70.0, 55.0, 180.0, 80.0, 80.0, 90.0, 70.0, 40.0, 65.0];
    let top = p.h - 70.0;
    p.table(30.0, top, &widths, &rows, 7.0, NAVY)?;
    Ok(())
}
