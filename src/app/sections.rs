//! Sections - composes the page content into a frame buffer.
//!
//! The page is drawn top to bottom into one tall content buffer; the event
//! loop blits the scrolled window out of it. Drawing functions return the
//! next free row so sections stack without a layout engine.

use crate::catalog::Project;
use crate::effects::reveal::{HIDDEN_OPACITY, HIDDEN_OFFSET_CELLS};
use crate::gate::GateError;
use crate::render::{truncate_text, wrap_text, BorderStyle, FrameBuffer};
use crate::theme::Theme;
use crate::types::{Attr, ClipRect, Rgba};

use super::Page;

/// Upper bound on composed content height, in rows.
pub const MAX_CONTENT_ROWS: u16 = 480;

/// Left margin for body text.
const MARGIN: u16 = 2;

/// Row positions the event loop needs for scroll-linked behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageLayout {
    pub about_top: u16,
    pub contact_top: u16,
    pub contact_height: u16,
    pub total_height: u16,
}

// =============================================================================
// Page composition
// =============================================================================

/// Draw the whole page into a fresh content buffer.
pub fn draw_content(page: &Page, theme: &Theme, width: u16, blink: bool) -> (FrameBuffer, PageLayout) {
    let mut buffer = FrameBuffer::new(width, MAX_CONTENT_ROWS);
    buffer.clear(theme.background);
    let mut layout = PageLayout::default();

    let mut row = draw_hero(&mut buffer, page, theme, 0);
    row = section_break(&mut buffer, theme, row);

    layout.about_top = row;
    row = draw_about(&mut buffer, page, theme, row);
    row = section_break(&mut buffer, theme, row);

    row = if page.catalog.selected().is_some() {
        draw_project_detail(&mut buffer, page, theme, row)
    } else {
        draw_projects(&mut buffer, page, theme, row)
    };
    row = section_break(&mut buffer, theme, row);

    layout.contact_top = row;
    row = draw_contact(&mut buffer, page, theme, row, blink);
    layout.contact_height = row - layout.contact_top;

    row = draw_footer(&mut buffer, theme, row, width);
    layout.total_height = row + 1;

    (buffer, layout)
}

fn section_break(buffer: &mut FrameBuffer, theme: &Theme, row: u16) -> u16 {
    let width = buffer.width();
    for x in 0..width {
        if x % 2 == 0 {
            buffer.put_char(x, row + 1, '╌', theme.border, Attr::DIM);
        }
    }
    row + 3
}

// =============================================================================
// Hero
// =============================================================================

fn draw_hero(buffer: &mut FrameBuffer, page: &Page, theme: &Theme, top: u16) -> u16 {
    let width = buffer.width();
    let mut row = top + 1;

    let id_tag = "ID: EE-27  LOC: JU-EE";
    let tag_x = width.saturating_sub(id_tag.len() as u16 + MARGIN);
    buffer.draw_text(tag_x, row, id_tag, theme.text_dim, None, Attr::BOLD);

    buffer.draw_text(MARGIN, row, "● SYSTEM READY", theme.accent, None, Attr::BOLD);
    row += 2;

    let first = page.hero_first.display();
    let first_attr = if page.hero_first.is_complete() {
        Attr::BOLD
    } else {
        Attr::BOLD | Attr::DIM
    };
    buffer.draw_text(MARGIN, row, &first, theme.accent, None, first_attr);
    row += 1;

    let second = page.hero_second.display();
    let second_attr = if page.hero_second.is_complete() {
        Attr::BOLD
    } else {
        Attr::BOLD | Attr::DIM
    };
    buffer.draw_text(MARGIN, row, &second, theme.text, None, second_attr);
    row += 2;

    buffer.draw_text(MARGIN, row, "━━━━━━━━", theme.accent, None, Attr::NONE);
    buffer.draw_text(MARGIN + 10, row, "I BUILD STUFFS.", theme.text, None, Attr::BOLD);
    buffer.draw_text(
        MARGIN + 27,
        row,
        "// Robotics, AI & Embedded Systems Engineer.",
        theme.text_dim,
        None,
        Attr::NONE,
    );
    row += 2;

    buffer.draw_text(
        MARGIN,
        row,
        "[G] GITHUB  [L] LINKEDIN  [E] EMAIL",
        theme.text,
        None,
        Attr::BOLD,
    );
    row + 1
}

// =============================================================================
// About
// =============================================================================

fn draw_about(buffer: &mut FrameBuffer, page: &Page, theme: &Theme, top: u16) -> u16 {
    let mut row = top;
    buffer.draw_text(MARGIN, row, "// 01. ABOUT ME", theme.accent, None, Attr::BOLD);
    row += 2;

    let states = page.about.line_states(page.about_progress);
    for (line, state) in page.about.lines().iter().zip(states) {
        if state.visible {
            buffer.draw_text(MARGIN, row, line.trim(), theme.text, None, Attr::BOLD);
        } else {
            // Hidden lines sit dimmed and nudged until progress reaches them.
            let ghost = theme.text.over(theme.background, HIDDEN_OPACITY);
            buffer.draw_text(
                MARGIN + HIDDEN_OFFSET_CELLS,
                row,
                line.trim(),
                ghost,
                None,
                Attr::DIM,
            );
        }
        row += 1;
    }
    row += 1;

    let stats = [
        ("EXPERIENCE", "4+ Years"),
        ("SYSTEMS", "ROS / Linux"),
        ("HARDWARE", "STM32 / PCB"),
        ("STATUS", "Available"),
    ];
    for (label, value) in stats {
        buffer.draw_text(MARGIN, row, label, theme.text_dim, None, Attr::NONE);
        buffer.draw_text(MARGIN + 12, row, value, theme.text, None, Attr::BOLD);
        row += 1;
    }
    row
}

// =============================================================================
// Projects
// =============================================================================

fn draw_projects(buffer: &mut FrameBuffer, page: &Page, theme: &Theme, top: u16) -> u16 {
    let width = buffer.width();
    let mut row = top;
    buffer.draw_text(MARGIN, row, "// 02. PROJECTS", theme.accent, None, Attr::BOLD);
    let index = "Index: 01-05";
    buffer.draw_text(
        width.saturating_sub(index.len() as u16 + MARGIN),
        row,
        index,
        theme.text_dim,
        None,
        Attr::NONE,
    );
    row += 2;

    for (i, project) in page.catalog.projects().iter().enumerate() {
        row = draw_project_card(buffer, project, i, theme, row);
        row += 1;
    }
    buffer.draw_text(
        MARGIN,
        row,
        "[1..5] OPEN PROJECT",
        theme.text_dim,
        None,
        Attr::NONE,
    );
    row + 1
}

fn draw_project_card(
    buffer: &mut FrameBuffer,
    project: &Project,
    index: usize,
    theme: &Theme,
    top: u16,
) -> u16 {
    let width = buffer.width();
    let card_width = width.saturating_sub(MARGIN * 2).min(76);
    let inner = card_width.saturating_sub(4);

    let desc_lines = wrap_text(project.short_desc, inner);
    let height = 4 + desc_lines.len() as u16 + 1;

    buffer.draw_border(
        ClipRect::new(MARGIN, top, card_width, height),
        BorderStyle::Single,
        theme.border,
    );

    let tag = format!("PRJ-{}00", index + 1);
    buffer.draw_text(MARGIN + 2, top + 1, &tag, theme.accent, None, Attr::BOLD);
    let title_x = MARGIN + 2 + tag.len() as u16 + 2;
    let title = truncate_text(
        project.title,
        (MARGIN + card_width).saturating_sub(title_x + 2),
    );
    buffer.draw_text(title_x, top + 1, &title, theme.text, None, Attr::BOLD);

    let mut row = top + 2;
    for line in &desc_lines {
        buffer.draw_text(MARGIN + 2, row, line, theme.text_dim, None, Attr::NONE);
        row += 1;
    }

    let stack = project
        .stack
        .iter()
        .map(|t| format!("[{t}]"))
        .collect::<Vec<_>>()
        .join(" ");
    buffer.draw_text(MARGIN + 2, row + 1, &stack, theme.accent, None, Attr::DIM);

    top + height
}

fn draw_project_detail(buffer: &mut FrameBuffer, page: &Page, theme: &Theme, top: u16) -> u16 {
    let Some(project) = page.catalog.selected() else {
        return top;
    };
    let width = buffer.width();
    let inner = width.saturating_sub(MARGIN * 2).min(76);
    let mut row = top;

    let tag = format!(
        "// 02. PROJECT {:02}/{:02}",
        page.catalog.selected_index().unwrap_or(0) + 1,
        page.catalog.len()
    );
    buffer.draw_text(MARGIN, row, &tag, theme.accent, None, Attr::BOLD);
    row += 2;

    buffer.draw_text(MARGIN, row, project.title, theme.text, None, Attr::BOLD);
    row += 1;
    let stack = project
        .stack
        .iter()
        .map(|t| format!("[{t}]"))
        .collect::<Vec<_>>()
        .join(" ");
    buffer.draw_text(MARGIN, row, &stack, theme.accent, None, Attr::DIM);
    row += 2;

    for line in wrap_text(project.short_desc, inner) {
        buffer.draw_text(MARGIN, row, &line, theme.text, None, Attr::NONE);
        row += 1;
    }
    row += 1;

    if let Some(details) = project.details {
        for line in wrap_text(details, inner) {
            buffer.draw_text(MARGIN, row, &line, theme.text_dim, None, Attr::NONE);
            row += 1;
        }
        row += 1;
    }

    buffer.draw_text(MARGIN, row, ">> Key Features", theme.accent, None, Attr::BOLD);
    row += 1;
    for feature in project.features {
        for (i, line) in wrap_text(feature, inner.saturating_sub(2)).iter().enumerate() {
            let bullet = if i == 0 { "• " } else { "  " };
            buffer.draw_text(MARGIN, row, bullet, theme.accent, None, Attr::NONE);
            buffer.draw_text(MARGIN + 2, row, line, theme.text, None, Attr::NONE);
            row += 1;
        }
    }
    row += 1;

    let mut links = Vec::new();
    if let Some(url) = project.github_url {
        links.push(format!("GITHUB: {url}"));
    }
    if let Some(url) = project.demo_url {
        links.push(format!("LIVE DEMO: {url}"));
    }
    for link in links {
        buffer.draw_text(MARGIN, row, &link, theme.text_dim, None, Attr::UNDERLINE);
        row += 1;
    }

    buffer.draw_text(
        MARGIN,
        row + 1,
        "[ESC] BACK  [N] NEXT  [P] PREV",
        theme.text_dim,
        None,
        Attr::NONE,
    );
    row + 2
}

// =============================================================================
// Contact
// =============================================================================

fn draw_contact(buffer: &mut FrameBuffer, page: &Page, theme: &Theme, top: u16, blink: bool) -> u16 {
    let width = buffer.width();
    let mut row = top;
    buffer.draw_text(MARGIN, row, "// 03. CONTACT", theme.accent, None, Attr::BOLD);
    row += 2;

    let term_width = width.saturating_sub(MARGIN * 2).min(76);
    let term_top = row;
    let stage = page.contact_stage.borrow();

    // Body rows depend on which staged lines have appeared.
    let mut body: Vec<(String, Rgba, Attr)> = Vec::new();
    body.push((
        "Welcome to Trishit Debsharma's Portfolio System".to_string(),
        theme.accent,
        Attr::NONE,
    ));
    body.push((String::new(), theme.text, Attr::NONE));

    let caret = if page.terminal.shows_caret() && blink {
        "_"
    } else {
        ""
    };
    body.push((
        format!("root@trishit:~$ {}{caret}", page.terminal.display()),
        theme.text,
        Attr::NONE,
    ));

    if stage.line1 {
        body.push((
            "> Initializing communication link...".to_string(),
            theme.text_dim,
            Attr::NONE,
        ));
    }
    if stage.line2 {
        body.push((
            "> Connection established.".to_string(),
            theme.text_dim,
            Attr::NONE,
        ));
    }
    if stage.line3 {
        body.push((
            "> Ready to receive transmission.".to_string(),
            theme.accent,
            Attr::NONE,
        ));
    }

    if stage.buttons {
        body.push((String::new(), theme.text, Attr::NONE));
        let verify_hint = if page.gate.is_verified() { "" } else { "  [VERIFY]" };
        body.push((
            format!("[E] SEND_EMAIL{verify_hint}"),
            theme.text,
            Attr::BOLD,
        ));
        body.push(("[G] GITHUB".to_string(), theme.text, Attr::BOLD));
        body.push(("[L] LINKEDIN".to_string(), theme.text, Attr::BOLD));
        if page.gate.copied_indicator() {
            body.push(("✓ EMAIL_COPIED".to_string(), theme.success, Attr::BOLD));
        } else {
            body.push((
                format!("[C] COPY_EMAIL{verify_hint}"),
                theme.text,
                Attr::BOLD,
            ));
        }
        if let Some(address) = page.gate.revealed_address() {
            body.push((format!("   {address}"), theme.text_dim, Attr::NONE));
        }
    }
    drop(stage);

    let term_height = body.len() as u16 + 3;
    buffer.draw_border(
        ClipRect::new(MARGIN, term_top, term_width, term_height),
        BorderStyle::Rounded,
        theme.border,
    );
    buffer.draw_text(
        MARGIN + 2,
        term_top,
        " terminal — bash — 80x24 ",
        theme.text_dim,
        None,
        Attr::NONE,
    );

    let clip = ClipRect::new(
        MARGIN + 2,
        term_top + 2,
        term_width.saturating_sub(4),
        body.len() as u16,
    );
    for (i, (text, fg, attrs)) in body.iter().enumerate() {
        buffer.draw_text_clipped(MARGIN + 2, term_top + 2 + i as u16, text, *fg, None, *attrs, clip);
    }

    term_top + term_height
}

fn draw_footer(buffer: &mut FrameBuffer, theme: &Theme, top: u16, width: u16) -> u16 {
    let line = "© 2026 TRISHIT DEBSHARMA // ELECTRICAL ENGINEERING PORTFOLIO // V.2.0.0";
    let x = width.saturating_sub(line.chars().count() as u16) / 2;
    buffer.draw_text(x, top + 1, line, theme.text_dim, None, Attr::DIM);
    top + 2
}

// =============================================================================
// Verification modal
// =============================================================================

/// Drawn over the scrolled window, centered. The modal does not live in the
/// content buffer because it must not scroll.
pub fn draw_modal(screen: &mut FrameBuffer, page: &Page, theme: &Theme, blink: bool) {
    let width = screen.width();
    let height = screen.height();
    let modal_width = 46.min(width.saturating_sub(2));
    let modal_height = 8u16;
    let x = (width.saturating_sub(modal_width)) / 2;
    let y = (height.saturating_sub(modal_height)) / 2;

    screen.fill_rect(ClipRect::new(x, y, modal_width, modal_height), theme.surface);
    screen.draw_border(
        ClipRect::new(x, y, modal_width, modal_height),
        BorderStyle::Double,
        theme.accent,
    );
    screen.draw_text(x + 2, y, " HUMAN VERIFICATION ", theme.accent, None, Attr::BOLD);

    let clip = ClipRect::new(x + 2, y + 1, modal_width.saturating_sub(4), modal_height - 2);
    screen.draw_text_clipped(
        x + 2,
        y + 2,
        page.gate.challenge_prompt(),
        theme.text,
        None,
        Attr::BOLD,
        clip,
    );

    let caret = if blink { "_" } else { " " };
    screen.draw_text_clipped(
        x + 2,
        y + 4,
        &format!("> {}{caret}", page.challenge_input),
        theme.text,
        None,
        Attr::NONE,
        clip,
    );

    if let Some(error) = page.gate.error() {
        let message = match error {
            GateError::ChallengeFailed => "VERIFICATION FAILED — TRY AGAIN",
            GateError::ChallengeExpired => "CHALLENGE EXPIRED — TRY AGAIN",
        };
        screen.draw_text(x + 2, y + 5, message, theme.error, None, Attr::BOLD);
    }

    screen.draw_text(
        x + 2,
        y + 6,
        "[ENTER] SUBMIT  [ESC] CANCEL",
        theme.text_dim,
        None,
        Attr::NONE,
    );
}
