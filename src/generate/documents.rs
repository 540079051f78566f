//! Layouts of the ten raster documents.
//!
//! Each layout fills its canvas with content typical of the document type so
//! the images look like real scans to a human reviewer. Only the canvas size
//! matters to the verifier; everything drawn here is decoration.

use super::sheet::{rgb, Sheet, BLACK, WHITE};
use crate::catalog::DocumentSpec;
use ab_glyph::FontVec;
use image::RgbImage;

/// Draw `spec` at its catalog size.
pub fn render_document(spec: &DocumentSpec, font: Option<&FontVec>) -> RgbImage {
    let draw: fn(&mut Sheet<'_>) = match spec.id {
        "01_long_receipt" => long_receipt,
        "02_wide_spreadsheet" => wide_spreadsheet,
        "03_research_paper_a4" => research_paper,
        "04_id_card_square" => id_card,
        "05_narrow_invoice" => narrow_invoice,
        "06_panoramic_timeline" => panoramic_timeline,
        "07_mobile_form" => mobile_form,
        "08_financial_report_4k" => financial_report,
        "09_medical_prescription" => medical_prescription,
        "10_postage_stamp" => postage_stamp,
        _ => blank_page,
    };
    let background = match spec.id {
        "01_long_receipt" | "05_narrow_invoice" => rgb(0xFFFEF5),
        "04_id_card_square" => rgb(0xE8F1FA),
        "10_postage_stamp" => rgb(0xFFF8E1),
        _ => WHITE,
    };
    let mut sheet = Sheet::new(spec.width, spec.height, background, font);
    draw(&mut sheet);
    sheet.into_image()
}

const GROCERIES: [(&str, &str); 30] = [
    ("Pain complet", "8.50"),
    ("Lait demi-ecreme 1L", "7.90"),
    ("Oeufs x12", "15.00"),
    ("Huile d'olive 1L", "45.00"),
    ("Tomates 1kg", "12.00"),
    ("Oignons 500g", "5.50"),
    ("Poulet entier", "55.00"),
    ("Riz 1kg", "14.00"),
    ("Sucre 1kg", "8.50"),
    ("The vert 250g", "22.00"),
    ("Beurre 250g", "18.00"),
    ("Fromage frais", "12.50"),
    ("Yaourt x4", "16.00"),
    ("Eau minerale 1.5L", "5.00"),
    ("Jus d'orange 1L", "15.00"),
    ("Bananes 1kg", "14.00"),
    ("Pommes 1kg", "18.00"),
    ("Carottes 500g", "6.00"),
    ("Cafe moulu 250g", "35.00"),
    ("Chocolat noir", "20.00"),
    ("Biscuits 400g", "18.50"),
    ("Miel 500g", "45.00"),
    ("Sardines x3", "24.00"),
    ("Pates 500g", "7.00"),
    ("Sauce tomate", "9.00"),
    ("Olives noires 200g", "15.00"),
    ("Lentilles 500g", "8.00"),
    ("Couscous 500g", "7.50"),
    ("Savon liquide", "22.00"),
    ("Lessive 2kg", "45.00"),
];

/// Deterministic filler amount for row `i` of a table seeded by `seed`.
fn amount(seed: u32, i: u32) -> u32 {
    (seed.wrapping_mul(7919).wrapping_add(i.wrapping_mul(104_729)) % 49_000) + 1_000
}

fn blank_page(_: &mut Sheet<'_>) {}

fn long_receipt(s: &mut Sheet<'_>) {
    let w = s.width();
    let title = (w / 8).max(8) as f32;
    let body = (w / 12).max(6) as f32;
    let small = (w / 14).max(5) as f32;
    let grey = rgb(0x666666);

    let mut y = 10;
    s.text_center(w / 2, y, title, BLACK, "SUPERMARCHE");
    y += title as i32 + 5;
    s.text_center(w / 2, y, body, rgb(0x333333), "CENTRAL MARKET");
    y += body as i32 + 3;
    for line in ["123 Avenue Mohammed V", "Casablanca, Morocco", "Tel: +212 522 123 456"] {
        s.text_center(w / 2, y, small, grey, line);
        y += small as i32 + 2;
    }
    y += 6;
    s.dashed_hline(5, w - 5, y, 2, 2, rgb(0x999999));
    y += 8;
    for line in ["Date: 2026-02-06 14:32", "Ticket: #A-4829173", "Cashier: Mohammed"] {
        s.text(5, y, small, BLACK, line);
        y += small as i32 + 2;
    }
    y += 6;
    s.dashed_hline(5, w - 5, y, 2, 2, rgb(0x999999));
    y += 8;

    let row = small as i32 + 3;
    let rows = ((s.height() - y - 200) / row).clamp(0, 50);
    let mut total = 0.0;
    for i in 0..rows as usize {
        let (name, price) = GROCERIES[i % GROCERIES.len()];
        total += price.parse::<f64>().unwrap_or(0.0);
        let name = s.fit(name, small, w - 10 - s.text_width(price, small) - 4);
        s.text(5, y, small, BLACK, &name);
        s.text_right(w - 5, y, small, BLACK, price);
        y += row;
    }

    y += 5;
    s.dashed_hline(5, w - 5, y, 2, 2, rgb(0x999999));
    y += 8;
    let vat = total * 0.20;
    for (label, value) in [("SOUS-TOTAL:", total), ("TVA (20%):", vat)] {
        s.text(5, y, body, BLACK, label);
        s.text_right(w - 5, y, body, BLACK, &format!("{value:.2}"));
        y += body as i32 + 3;
    }
    s.dashed_hline(5, w - 5, y, 1, 1, BLACK);
    y += 5;
    s.text(5, y, title, BLACK, "TOTAL:");
    y += title as i32 + 2;
    s.text_right(w - 5, y, body, BLACK, &format!("{:.2} MAD", total + vat));
    y += title as i32 + 10;
    s.text(5, y, small, rgb(0x333333), "Paiement: Carte");
    y += small as i32 + 3;
    s.text(5, y, small, rgb(0x333333), "**** 7842");
    y += small as i32 + 15;
    s.text_center(w / 2, y, body, rgb(0x333333), "Merci!");
    y += body as i32 + 3;
    s.text_center(w / 2, y, small, grey, "A bientot!");
}

fn wide_spreadsheet(s: &mut Sheet<'_>) {
    let (w, h) = (s.width(), s.height());
    let headers = [
        "ID", "Nom", "Prenom", "Email", "Telephone", "Ville", "Pays", "Naissance", "Poste", "Dept",
        "Salaire", "Debut", "Status", "Manager", "Bureau", "Etage", "Badge", "Parking", "Tel 2",
        "Notes",
    ];
    let rows = [
        [
            "001", "Benali", "Ahmed", "a.benali@mail", "+212 6123", "Casa", "MA", "1990-05-12",
            "Dev Sr", "IT", "18000", "2020-01", "Actif", "M.Idrissi", "B2-304", "3", "A-1823",
            "P-42", "+212 5221", "Lead",
        ],
        [
            "002", "El Fassi", "Sara", "s.elfassi@m", "+212 6456", "Rabat", "MA", "1992-11-03",
            "PM", "Prod", "22000", "2019-06", "Actif", "K.Alami", "B1-102", "1", "A-2941", "P-18",
            "+212 5372", "Senior",
        ],
    ];

    let col = w / headers.len() as i32;
    let header_h = h / 3;
    let head_size = (h / 7).max(6) as f32;
    let cell_size = (h / 8).max(6) as f32;

    s.fill_rect(0, 0, w, header_h, rgb(0x2C3E50));
    for (i, head) in headers.iter().enumerate() {
        let x = i as i32 * col + 3;
        let text = s.fit(head, head_size, col - 6);
        s.text(x, 3, head_size, WHITE, &text);
    }

    let row_h = (h - header_h) / rows.len() as i32;
    for (r, cells) in rows.iter().enumerate() {
        let y = header_h + r as i32 * row_h;
        if r % 2 == 0 {
            s.fill_rect(0, y, w, row_h, rgb(0xECF0F1));
        }
        for (i, cell) in cells.iter().enumerate() {
            let text = s.fit(cell, cell_size, col - 6);
            s.text(i as i32 * col + 3, y + 3, cell_size, rgb(0x2C3E50), &text);
        }
    }
    for i in 0..=headers.len() as i32 {
        s.line(i * col, 0, i * col, h - 1, rgb(0xBDC3C7));
    }
}

fn research_paper(s: &mut Sheet<'_>) {
    let (w, h) = (s.width(), s.height());
    let margin = 40;
    let gutter = 16;
    let col_w = (w - 2 * margin - gutter) / 2;

    s.text_center(w / 2, 30, 15.0, BLACK, "Native-Resolution Tokenization for Document OCR");
    s.text_center(w / 2, 52, 9.0, rgb(0x444444), "A. Benali, S. El Fassi, K. Alami");
    s.text_center(w / 2, 65, 8.0, rgb(0x666666), "Department of Computer Science, Casablanca");
    s.line(margin, 82, w - margin, 82, rgb(0x999999));

    s.text(margin, 92, 9.0, BLACK, "Abstract");
    let abstract_lines = [
        "Vision-language models differ in how they map page pixels to tokens.",
        "We measure whether token budgets follow native resolution for receipts,",
        "spreadsheets and multi-page reports across extreme aspect ratios.",
    ];
    let mut y = 106;
    for line in abstract_lines {
        let line = s.fit(line, 7.5, w - 2 * margin);
        s.text(margin, y, 7.5, rgb(0x333333), &line);
        y += 11;
    }
    y += 8;

    let sections = [
        "1. Introduction",
        "2. Related Work",
        "3. Method",
        "4. Experiments",
        "5. Results",
    ];
    let filler = "Patch grids scale with the page so small print stays legible to the encoder";
    for column in 0..2 {
        let x = margin + column * (col_w + gutter);
        let mut cy = y;
        for (i, title) in sections.iter().enumerate().skip(column as usize * 3).take(3) {
            s.text(x, cy, 9.0, BLACK, title);
            cy += 15;
            for k in 0..(12 + i) {
                let text = s.fit(filler, 7.0, col_w - (k as i32 % 3) * 12);
                s.text(x, cy, 7.0, rgb(0x222222), &text);
                cy += 10;
            }
            if i == 3 {
                // results table
                s.stroke_rect(x, cy + 4, col_w, 60, rgb(0x555555));
                s.fill_rect(x + 1, cy + 5, col_w - 2, 12, rgb(0xE0E0E0));
                for r in 1..4 {
                    s.line(x, cy + 4 + r * 15, x + col_w - 1, cy + 4 + r * 15, rgb(0xAAAAAA));
                }
                cy += 72;
            }
            cy += 8;
            if cy > h - 60 {
                break;
            }
        }
    }
    s.text_center(w / 2, h - 25, 7.0, rgb(0x888888), "1");
}

fn id_card(s: &mut Sheet<'_>) {
    let (w, h) = (s.width(), s.height());
    s.fill_rect(0, 0, w, 70, rgb(0x006233));
    s.text_center(w / 2, 14, 20.0, WHITE, "KINGDOM OF MOROCCO");
    s.text_center(w / 2, 42, 13.0, WHITE, "NATIONAL IDENTITY CARD");
    s.fill_rect(0, 70, w, 6, rgb(0xC1272D));

    // photo
    s.fill_rect(30, 100, 150, 190, rgb(0xCFD8DC));
    s.circle(105, 165, 40, rgb(0x90A4AE));
    s.fill_rect(55, 215, 100, 75, rgb(0x90A4AE));
    s.stroke_rect(30, 100, 150, 190, rgb(0x455A64));

    let fields = [
        ("Surname", "BENALI"),
        ("Given names", "AHMED"),
        ("Date of birth", "12.05.1990"),
        ("Place of birth", "CASABLANCA"),
        ("Card number", "BK482917"),
        ("Expiry", "11.03.2031"),
    ];
    let mut y = 100;
    for (label, value) in fields {
        s.text(200, y, 11.0, rgb(0x607D8B), label);
        s.text(200, y + 13, 16.0, BLACK, value);
        y += 34;
    }

    // machine readable zone
    s.fill_rect(0, h - 110, w, 110, rgb(0xF5F5F5));
    for (i, line) in [
        "IDMARBK482917<<<<<<<<<<<<<<<",
        "9005120M3103111MAR<<<<<<<<<<4",
        "BENALI<<AHMED<<<<<<<<<<<<<<<<",
    ]
    .iter()
    .enumerate()
    {
        s.text(20, h - 100 + i as i32 * 30, 17.0, BLACK, line);
    }
}

fn narrow_invoice(s: &mut Sheet<'_>) {
    let w = s.width();
    let size = 9.0;
    let mut y = 12;
    s.fill_rect(0, 0, w, 40, rgb(0x37474F));
    s.text_center(w / 2, y, 12.0, WHITE, "FACTURE");
    y += 16;
    s.text_center(w / 2, y, 8.0, rgb(0xCFD8DC), "N. F-2026-0142");
    y = 52;

    for line in ["TechServ SARL", "45 Bd Zerktouni", "Casablanca", "ICE 00182736"] {
        s.text(6, y, 8.0, rgb(0x455A64), line);
        y += 11;
    }
    y += 8;
    s.line(6, y, w - 6, y, rgb(0x90A4AE));
    y += 8;

    let services = [
        "Maintenance", "Support N2", "Licence", "Sauvegarde", "Audit", "Formation", "Hebergement",
        "Supervision", "Migration", "Conseil",
    ];
    let mut total = 0;
    let mut i = 0;
    while y < s.height() - 160 {
        let name = services[i % services.len()];
        let price = amount(5, i as u32) / 10;
        total += price;
        s.text(6, y, size, BLACK, name);
        y += 11;
        s.text_right(w - 6, y, size, rgb(0x37474F), &format!("{price}.00"));
        y += 14;
        if i % 4 == 3 {
            s.dashed_hline(6, w - 6, y - 3, 3, 2, rgb(0xB0BEC5));
        }
        i += 1;
    }

    y += 10;
    s.fill_rect(0, y, w, 60, rgb(0xECEFF1));
    s.text(6, y + 8, 10.0, BLACK, "TOTAL HT");
    s.text_right(w - 6, y + 22, 10.0, BLACK, &format!("{total}.00"));
    s.text(6, y + 40, 8.0, rgb(0x607D8B), "TVA 20% incluse");
    s.text_center(w / 2, s.height() - 30, 8.0, rgb(0x78909C), "Merci");
}

fn panoramic_timeline(s: &mut Sheet<'_>) {
    let (w, h) = (s.width(), s.height());
    let axis = h / 2;
    s.fill_rect(0, 0, w, 14, rgb(0x1A237E));
    s.text(8, 2, 10.0, WHITE, "PROJECT TIMELINE 2026 - DIGITAL TRANSFORMATION PROGRAM");
    s.line(0, axis, w - 1, axis, rgb(0x3949AB));

    let months = [
        "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
    ];
    let month_w = w / months.len() as i32;
    for (i, m) in months.iter().enumerate() {
        let x = i as i32 * month_w;
        s.line(x, axis - 4, x, axis + 4, rgb(0x3949AB));
        s.text(x + 4, axis + 6, 9.0, rgb(0x283593), m);
    }

    let milestones = [
        (0.04, "Kickoff", 0xE65100),
        (0.15, "Cloud landing zone", 0x2E7D32),
        (0.27, "Data platform", 0x1565C0),
        (0.40, "Pilot AI use cases", 0x6A1B9A),
        (0.55, "ERP migration", 0xC62828),
        (0.68, "Training wave 2", 0x00838F),
        (0.80, "Go-live", 0x2E7D32),
        (0.93, "Review", 0x4E342E),
    ];
    for (pos, label, color) in milestones {
        let x = (w as f64 * pos) as i32;
        s.circle(x, axis, 4, rgb(color));
        s.text(x + 7, axis - 16, 9.0, rgb(color), label);
    }
}

fn mobile_form(s: &mut Sheet<'_>) {
    let (w, h) = (s.width(), s.height());
    s.fill_rect(0, 0, w, 24, rgb(0x212121));
    s.text(12, 6, 11.0, WHITE, "9:41");
    s.text_right(w - 12, 6, 11.0, WHITE, "100%");
    s.fill_rect(0, 24, w, 56, rgb(0x1976D2));
    s.text(20, 42, 18.0, WHITE, "Create account");

    let fields = [
        "Full name", "Email address", "Phone number", "Date of birth", "City", "Password",
        "Confirm password",
    ];
    let mut y = 100;
    for label in fields {
        s.text(20, y, 12.0, rgb(0x616161), label);
        s.stroke_rect(20, y + 16, w - 40, 40, rgb(0xBDBDBD));
        s.text(30, y + 28, 13.0, rgb(0x9E9E9E), &format!("Enter {}", label.to_lowercase()));
        y += 72;
    }

    s.stroke_rect(20, y, 18, 18, rgb(0x757575));
    s.text(46, y + 2, 11.0, rgb(0x424242), "I accept the terms");
    y += 36;
    s.fill_rect(20, y, w - 40, 48, rgb(0x1976D2));
    s.text_center(w / 2, y + 16, 15.0, WHITE, "SIGN UP");
    s.fill_rect(w / 2 - 67, h - 12, 134, 5, rgb(0x212121));
}

fn financial_report(s: &mut Sheet<'_>) {
    let (w, h) = (s.width(), s.height());
    s.fill_rect(0, 0, w, 160, rgb(0x0D47A1));
    s.text(80, 40, 64.0, WHITE, "ANNUAL FINANCIAL REPORT 2025");
    s.text(80, 115, 30.0, rgb(0xBBDEFB), "Groupe Benali - Consolidated statements");

    // KPI tiles
    let kpis = [
        ("Revenue", "2.4 B MAD", "+18.5%"),
        ("Net income", "340 M MAD", "+22.0%"),
        ("EBITDA", "600 M MAD", "+21.7%"),
        ("Headcount", "4 850", "+6.1%"),
    ];
    let tile_w = (w - 160 - 3 * 40) / 4;
    for (i, (label, value, delta)) in kpis.iter().enumerate() {
        let x = 80 + i as i32 * (tile_w + 40);
        s.fill_rect(x, 200, tile_w, 200, rgb(0xE3F2FD));
        s.text(x + 30, 225, 30.0, rgb(0x546E7A), label);
        s.text(x + 30, 275, 56.0, rgb(0x0D47A1), value);
        s.text(x + 30, 350, 28.0, rgb(0x2E7D32), delta);
    }

    // quarterly bar chart
    let chart = (80, 460, w / 2 - 120, 900);
    s.stroke_rect(chart.0, chart.1, chart.2, chart.3, rgb(0xB0BEC5));
    s.text(chart.0 + 20, chart.1 + 20, 32.0, BLACK, "Quarterly revenue (M MAD)");
    let quarters = [520, 580, 610, 690, 455, 505, 540, 525];
    let bar_w = (chart.2 - 80) / quarters.len() as i32;
    let base = chart.1 + chart.3 - 60;
    for (i, q) in quarters.iter().enumerate() {
        let bar_h = *q;
        let x = chart.0 + 40 + i as i32 * bar_w;
        let color = if i < 4 { rgb(0x1E88E5) } else { rgb(0x90CAF9) };
        s.fill_rect(x + 10, base - bar_h, bar_w - 20, bar_h, color);
        s.text(x + 10, base + 10, 22.0, rgb(0x455A64), &format!("Q{}", i % 4 + 1));
    }

    // statement table
    let tx = w / 2 + 40;
    let rows = [
        ("Revenue", "2 400", "2 025", "+18.5%"),
        ("Cost of sales", "1 560", "1 357", "+14.9%"),
        ("Gross margin", "840", "668", "+25.7%"),
        ("Operating expenses", "360", "273", "+31.9%"),
        ("Operating income", "480", "395", "+21.5%"),
        ("Financial result", "-40", "-45", "-11.1%"),
        ("Income before tax", "440", "350", "+25.7%"),
        ("Income tax", "100", "71", "+40.8%"),
        ("Net income", "340", "279", "+21.9%"),
        ("Depreciation", "120", "98", "+22.4%"),
        ("EBITDA", "600", "493", "+21.7%"),
        ("EBITDA margin", "25.0%", "24.3%", "+0.7 pts"),
    ];
    let cols = [tx, tx + 700, tx + 1000, tx + 1300];
    let row_h = 64;
    let mut y = 460;
    s.fill_rect(tx, y, w - 80 - tx, row_h, rgb(0x0D47A1));
    for (x, head) in cols.iter().zip(["Item", "2025", "2024", "Change"]) {
        s.text(x + 20, y + 16, 30.0, WHITE, head);
    }
    y += row_h;
    for (i, (a, b, c, d)) in rows.iter().enumerate() {
        if i % 2 == 1 {
            s.fill_rect(tx, y, w - 80 - tx, row_h, rgb(0xF5F5F5));
        }
        for (x, cell) in cols.iter().zip([a, b, c, d]) {
            s.text(x + 20, y + 16, 28.0, rgb(0x263238), cell);
        }
        s.line(tx, y + row_h - 1, w - 81, y + row_h - 1, rgb(0xE0E0E0));
        y += row_h;
    }

    s.fill_rect(0, h - 80, w, 80, rgb(0xECEFF1));
    s.text(80, h - 58, 26.0, rgb(0x78909C), "Confidential - Finance Department - Casablanca");
    s.text_right(w - 80, h - 58, 26.0, rgb(0x78909C), "Page 1/48");
}

fn medical_prescription(s: &mut Sheet<'_>) {
    let (w, h) = (s.width(), s.height());
    let green = rgb(0x1B5E20);
    s.fill_rect(0, 0, w, 100, rgb(0xE8F5E9));
    s.text(40, 20, 28.0, green, "Dr. Karim ALAMI");
    s.text(40, 56, 16.0, rgb(0x388E3C), "General Practitioner - Internal Medicine");
    s.text_right(w - 40, 24, 14.0, rgb(0x4E5D52), "12 Rue Ibn Sina, Rabat");
    s.text_right(w - 40, 46, 14.0, rgb(0x4E5D52), "Tel: +212 537 44 21 90");
    s.fill_rect(0, 100, w, 4, green);

    s.text(40, 125, 16.0, BLACK, "Patient: Mme Sara EL FASSI");
    s.text_right(w - 40, 125, 16.0, BLACK, "Date: 06/02/2026");
    s.text(40, 165, 40.0, green, "Rx");

    let meds = [
        ("Amoxicilline 1g", "1 comprime matin et soir pendant 7 jours"),
        ("Paracetamol 500mg", "1 a 2 comprimes toutes les 6 heures si douleur"),
        ("Omeprazole 20mg", "1 gelule le matin a jeun pendant 14 jours"),
        ("Vitamine D3 1000 UI", "1 capsule par jour pendant 3 mois"),
    ];
    let mut y = 220;
    for (i, (name, dose)) in meds.iter().enumerate() {
        s.text(70, y, 18.0, BLACK, &format!("{}. {name}", i + 1));
        s.text(95, y + 24, 14.0, rgb(0x555555), dose);
        y += 62;
    }

    s.line(w - 300, h - 80, w - 60, h - 80, rgb(0x9E9E9E));
    s.text_center(w - 180, h - 70, 13.0, rgb(0x757575), "Signature & cachet");
    s.circle(w - 180, h - 120, 32, rgb(0xC8E6C9));
}

fn postage_stamp(s: &mut Sheet<'_>) {
    let (w, h) = (s.width(), s.height());
    // perforations
    for x in (2..w).step_by(6) {
        s.circle(x, 0, 2, WHITE);
        s.circle(x, h - 1, 2, WHITE);
    }
    for y in (2..h).step_by(6) {
        s.circle(0, y, 2, WHITE);
        s.circle(w - 1, y, 2, WHITE);
    }
    s.stroke_rect(4, 4, w - 8, h - 8, rgb(0xB71C1C));
    s.text_center(w / 2, 7, 7.0, rgb(0x1B5E20), "MAROC");
    let (cx, cy) = (w / 2, h / 2);
    s.circle(cx, cy, 9, rgb(0xFFD54F));
    s.line(cx, cy - 8, cx + 7, cy + 5, rgb(0x1B5E20));
    s.line(cx + 7, cy + 5, cx - 7, cy + 5, rgb(0x1B5E20));
    s.line(cx - 7, cy + 5, cx, cy - 8, rgb(0x1B5E20));
    s.text_center(w / 2, h - 20, 8.0, rgb(0xB71C1C), "3.75");
    s.text_center(w / 2, h - 12, 6.0, rgb(0x333333), "MAD");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DOCUMENTS;

    #[test]
    fn every_layout_matches_catalog_size() {
        for spec in DOCUMENTS.iter() {
            let img = render_document(spec, None);
            assert_eq!(img.dimensions(), (spec.width, spec.height), "{}", spec.id);
        }
    }

    #[test]
    fn layouts_put_ink_on_the_page() {
        for spec in DOCUMENTS.iter() {
            let img = render_document(spec, None);
            let first = *img.get_pixel(0, 0);
            assert!(img.pixels().any(|p| *p != first), "{} is blank", spec.id);
        }
    }

    #[test]
    fn filler_amounts_are_stable_and_bounded() {
        assert_eq!(amount(3, 7), amount(3, 7));
        for i in 0..100 {
            let a = amount(11, i);
            assert!((1_000..50_000).contains(&a));
        }
    }
}
