use crate::error::Result;
use crate::models::application::{ApplicationStatus, JobApplication, Priority};
use crate::utils::salary::extract_salary;
use crate::utils::time::format_day;
use rust_xlsxwriter::*;
use std::borrow::Cow;

/// Longest string Excel accepts in a cell.
const MAX_CELL_CHARS: usize = 32_767;
/// Hyperlinks longer than this are written as plain text.
const MAX_URL_CHARS: usize = 2_000;
const LINK_SCHEMES: [&str; 4] = ["http://", "https://", "ftp://", "mailto:"];

/// Clips text to what fits in one cell.
fn cell_text(text: &str) -> Cow<'_, str> {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        Some((end, _)) => Cow::Owned(text[..end].to_string()),
        None => Cow::Borrowed(text),
    }
}

/// Only URLs with a scheme Excel can open become hyperlinks; anything else
/// the user typed stays as text.
fn is_linkable(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    url.chars().count() <= MAX_URL_CHARS
        && !url.chars().any(char::is_whitespace)
        && LINK_SCHEMES.iter().any(|scheme| lower.starts_with(scheme))
}

pub struct ExportService;

impl ExportService {
    fn status_color(status: ApplicationStatus) -> Color {
        match status {
            ApplicationStatus::Saved => Color::RGB(0x9C27B0),
            ApplicationStatus::Applied => Color::RGB(0x2196F3),
            ApplicationStatus::Interview => Color::RGB(0xFF9800),
            ApplicationStatus::Offer => Color::RGB(0x4CAF50),
            ApplicationStatus::Rejected => Color::RGB(0xF44336),
        }
    }

    fn priority_label(priority: Option<Priority>) -> &'static str {
        match priority {
            Some(Priority::High) => "High",
            Some(Priority::Medium) => "Medium",
            Some(Priority::Low) => "Low",
            None => "—",
        }
    }

    /// Generate a styled XLSX workbook from a list of applications, in the
    /// order given.
    pub fn generate_applications_xlsx(applications: &[JobApplication]) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Applications")?;

        // ── Color palette ──
        let primary_color = Color::RGB(0x1E293B); // Slate 800
        let header_bg = Color::RGB(0x0F172A); // Slate 900
        let header_text = Color::White;
        let alt_row_1 = Color::RGB(0xF8FAFC); // Slate 50
        let alt_row_2 = Color::White;
        let border_color = Color::RGB(0xE2E8F0); // Slate 200

        // ── Column definitions ──
        let columns = [
            ("#", 6.0),
            ("Job Title", 30.0),
            ("Company", 24.0),
            ("Applied", 14.0),
            ("Status", 14.0),
            ("Priority", 11.0),
            ("Location", 20.0),
            ("Salary", 22.0),
            ("Salary (parsed)", 15.0),
            ("Interview", 24.0),
            ("Posting", 32.0),
            ("Notes", 45.0),
        ];

        for (i, (_, width)) in columns.iter().enumerate() {
            worksheet.set_column_width(i as u16, *width)?;
        }

        // ── Title row ──
        let title_format = Format::new()
            .set_font_size(16)
            .set_bold()
            .set_font_color(header_text)
            .set_background_color(primary_color)
            .set_align(FormatAlign::CenterAcross)
            .set_align(FormatAlign::VerticalCenter);

        worksheet.set_row_height(0, 36)?;
        worksheet.merge_range(
            0,
            0,
            0,
            (columns.len() - 1) as u16,
            "Job Applications",
            &title_format,
        )?;

        // ── Subtitle row ──
        let subtitle_format = Format::new()
            .set_font_size(10)
            .set_italic()
            .set_font_color(Color::RGB(0x94A3B8))
            .set_background_color(primary_color)
            .set_align(FormatAlign::CenterAcross)
            .set_align(FormatAlign::VerticalCenter);

        worksheet.set_row_height(1, 22)?;
        let now = chrono::Utc::now().format("%Y-%m-%d %H:%M UTC").to_string();
        let subtitle_text = format!(
            "Exported {}  •  {} applications",
            now,
            applications.len()
        );
        worksheet.merge_range(
            1,
            0,
            1,
            (columns.len() - 1) as u16,
            &subtitle_text,
            &subtitle_format,
        )?;

        // ── Header row ──
        let header_format = Format::new()
            .set_bold()
            .set_font_size(10)
            .set_font_color(header_text)
            .set_background_color(header_bg)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap()
            .set_border(FormatBorder::Thin)
            .set_border_color(border_color);

        let header_row = 2;
        worksheet.set_row_height(header_row, 28)?;
        for (i, (name, _)) in columns.iter().enumerate() {
            worksheet.write_string_with_format(header_row, i as u16, *name, &header_format)?;
        }

        // ── Data rows ──
        let data_start_row = 3;
        for (idx, application) in applications.iter().enumerate() {
            let row = data_start_row + idx as u32;
            let bg = if idx % 2 == 0 { alt_row_1 } else { alt_row_2 };

            let base_fmt = Format::new()
                .set_font_size(10)
                .set_background_color(bg)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Thin)
                .set_border_color(border_color);
            let center_fmt = base_fmt.clone().set_align(FormatAlign::Center);
            let wrap_fmt = base_fmt.clone().set_text_wrap();

            worksheet.set_row_height(row, 22)?;

            worksheet.write_number_with_format(row, 0, (idx + 1) as f64, &center_fmt)?;

            let title_fmt = base_fmt.clone().set_bold();
            worksheet.write_string_with_format(row, 1, cell_text(&application.title), &title_fmt)?;
            worksheet.write_string_with_format(row, 2, cell_text(&application.company), &base_fmt)?;
            worksheet.write_string_with_format(row, 3, format_day(application.date), &center_fmt)?;

            let status_fmt = Format::new()
                .set_font_size(10)
                .set_bold()
                .set_font_color(Color::White)
                .set_background_color(Self::status_color(application.status))
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Thin)
                .set_border_color(border_color);
            worksheet.write_string_with_format(row, 4, application.status.as_str(), &status_fmt)?;

            worksheet.write_string_with_format(
                row,
                5,
                Self::priority_label(application.priority),
                &center_fmt,
            )?;
            worksheet.write_string_with_format(
                row,
                6,
                cell_text(application.location.as_deref().unwrap_or("—")),
                &base_fmt,
            )?;
            worksheet.write_string_with_format(
                row,
                7,
                cell_text(application.salary.as_deref().unwrap_or("—")),
                &base_fmt,
            )?;
            worksheet.write_number_with_format(
                row,
                8,
                extract_salary(application.salary.as_deref()),
                &center_fmt,
            )?;

            let interview = &application.interview;
            let interview_text = if interview.is_empty() {
                "—".to_string()
            } else {
                [interview.date.as_deref(), interview.kind.as_deref()]
                    .into_iter()
                    .flatten()
                    .collect::<Vec<_>>()
                    .join(" · ")
            };
            worksheet.write_string_with_format(row, 9, cell_text(&interview_text), &wrap_fmt)?;

            match application.url.as_deref() {
                Some(url) if is_linkable(url) => {
                    if let Err(e) = worksheet.write_url_with_format(row, 10, url, &base_fmt) {
                        tracing::warn!(error = %e, "Writing posting link as text");
                        worksheet.write_string_with_format(row, 10, cell_text(url), &base_fmt)?;
                    }
                }
                Some(url) => {
                    worksheet.write_string_with_format(row, 10, cell_text(url), &base_fmt)?;
                }
                None => {
                    worksheet.write_string_with_format(row, 10, "—", &base_fmt)?;
                }
            }

            worksheet.write_string_with_format(
                row,
                11,
                cell_text(application.notes.as_deref().unwrap_or("—")),
                &wrap_fmt,
            )?;
        }

        // ── Summary row ──
        let total_row = data_start_row + applications.len() as u32 + 1;
        let summary_fmt = Format::new()
            .set_bold()
            .set_font_size(10)
            .set_font_color(primary_color)
            .set_background_color(Color::RGB(0xE0E7FF)) // Indigo 100
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Thin)
            .set_border_color(border_color);

        worksheet.set_row_height(total_row, 26)?;
        worksheet.merge_range(
            total_row,
            0,
            total_row,
            2,
            &format!("Total: {}", applications.len()),
            &summary_fmt,
        )?;

        let status_summary = ApplicationStatus::ALL
            .into_iter()
            .map(|status| {
                let count = applications.iter().filter(|a| a.status == status).count();
                format!("{}: {}", status, count)
            })
            .collect::<Vec<_>>()
            .join(" | ");
        worksheet.merge_range(
            total_row,
            3,
            total_row,
            (columns.len() - 1) as u16,
            &status_summary,
            &summary_fmt,
        )?;

        worksheet.set_freeze_panes(3, 0)?;
        worksheet.autofilter(
            2,
            0,
            (data_start_row + applications.len() as u32).saturating_sub(1).max(2),
            (columns.len() - 1) as u16,
        )?;

        let buffer = workbook.save_to_buffer()?;
        Ok(buffer)
    }
}
