use crate::calendar::format_buddhist_date;
use crate::errors::AppError;
use crate::report::{Cell, LearnerKind, LearnerReport, MemberReport, Sheet};
use chrono::NaiveDate;

pub fn render_index() -> String {
    let body = r#"
    <section class="menu">
      <a class="card" href="/reports/members">รายงานจำนวนสมาชิก</a>
      <a class="card" href="/reports/courses">รายงานจำนวนผู้เรียนในแต่ละหลักสูตร</a>
      <a class="card" href="/reports/subjects">รายงานจำนวนผู้เรียนในแต่ละรายวิชา</a>
    </section>"#;
    render_page("รายงานระบบการเรียนรู้", body)
}

pub fn render_member_page(date: NaiveDate, outcome: Result<&MemberReport, &AppError>) -> String {
    let form = format!(
        r#"
    <form class="filters" method="get" action="/reports/members">
      <label>วันที่ <input type="date" name="date" value="{date}" /></label>
      <span class="buddhist">{display}</span>
      <button type="submit">แสดงรายงาน</button>
    </form>"#,
        display = escape(&format_buddhist_date(date)),
    );

    match outcome {
        Ok(report) => {
            let export = format!("/reports/members/export?date={date}");
            let body = format!(
                "{form}{}",
                render_results(&report.title, &report.date_display(), &report.sheet(), &export)
            );
            render_page(&report.title, &body)
        }
        Err(err) => render_page("รายงานจำนวนสมาชิก", &format!("{form}{}", render_error(err))),
    }
}

pub fn render_learner_page(
    kind: LearnerKind,
    start: NaiveDate,
    end: NaiveDate,
    outcome: Result<&LearnerReport, &AppError>,
) -> String {
    let slug = kind.slug();
    let form = format!(
        r#"
    <form class="filters" method="get" action="/reports/{slug}">
      <label>วันที่เริ่มต้น <input type="date" name="start" value="{start}" /></label>
      <label>วันที่สิ้นสุด <input type="date" name="end" value="{end}" /></label>
      <span class="buddhist">{from} ถึง {to}</span>
      <button type="submit">แสดงรายงาน</button>
    </form>"#,
        from = escape(&format_buddhist_date(start)),
        to = escape(&format_buddhist_date(end)),
    );

    match outcome {
        Ok(report) => {
            let export = format!("/reports/{slug}/export?start={start}&end={end}");
            let body = format!(
                "{form}{}",
                render_results(&report.title, &report.range_display(), &report.sheet(), &export)
            );
            render_page(&report.title, &body)
        }
        Err(err) => render_page(&kind.default_title(), &format!("{form}{}", render_error(err))),
    }
}

fn render_results(title: &str, subtitle: &str, sheet: &Sheet, export_href: &str) -> String {
    let header: String = sheet
        .header
        .iter()
        .map(|title| format!("<th>{}</th>", escape(title)))
        .collect();
    let rows: String = sheet
        .rows
        .iter()
        .map(|cells| render_row(cells, ""))
        .collect();
    let total = render_row(&sheet.total, " class=\"total\"");

    format!(
        r#"
    <section class="results">
      <div class="results-header">
        <div>
          <h2 id="report-title">{title}</h2>
          <p id="current-date" class="subtitle">{subtitle}</p>
        </div>
        <a class="export" id="export-btn" href="{export_href}">ส่งออก Excel</a>
      </div>
      <table>
        <thead><tr>{header}</tr></thead>
        <tbody id="table-body">{rows}{total}</tbody>
      </table>
    </section>"#,
        title = escape(title),
        subtitle = escape(subtitle),
        export_href = escape(export_href),
    )
}

fn render_row(cells: &[Cell], attrs: &str) -> String {
    let cells: String = cells
        .iter()
        .map(|cell| match cell {
            Cell::Text(text) => format!("<td>{}</td>", escape(text)),
            Cell::Number(value) => format!("<td class=\"num\">{}</td>", group_thousands(*value)),
        })
        .collect();
    format!("<tr{attrs}>{cells}</tr>")
}

fn render_error(err: &AppError) -> String {
    format!(
        r#"
    <section class="error-message show" id="error-message">
      <p id="error-content">{}</p>
      <p id="error-details" class="hint">{}</p>
    </section>"#,
        escape(&err.message),
        escape(err.details.as_deref().unwrap_or_default()),
    )
}

fn render_page(title: &str, body: &str) -> String {
    PAGE_HTML
        .replace("{{TITLE}}", &escape(title))
        .replace("{{BODY}}", body)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="th">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Kanit:wght@400;500;600&display=swap');

    :root {
      --bg-1: #f1f5f9;
      --ink: #1f2937;
      --accent: #003f5c;
      --accent-2: #ff6361;
      --card: rgba(255, 255, 255, 0.92);
      --shadow: 0 24px 60px rgba(0, 63, 92, 0.14);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg-1);
      color: var(--ink);
      font-family: "Kanit", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      background: var(--card);
      border-radius: 24px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 24px;
    }

    h1, h2 {
      margin: 0;
    }

    .subtitle, .hint {
      margin: 4px 0 0;
      color: #64748b;
    }

    .menu {
      display: grid;
      gap: 12px;
    }

    .card {
      display: block;
      padding: 18px;
      border-radius: 16px;
      background: white;
      border: 1px solid rgba(0, 63, 92, 0.1);
      color: var(--accent);
      text-decoration: none;
      font-weight: 500;
    }

    .filters {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      gap: 12px;
    }

    .buddhist {
      color: #64748b;
    }

    button, .export {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
      text-decoration: none;
    }

    .export {
      background: var(--accent-2);
    }

    .results-header {
      display: flex;
      flex-wrap: wrap;
      justify-content: space-between;
      align-items: center;
      gap: 16px;
    }

    table {
      width: 100%;
      border-collapse: collapse;
      margin-top: 16px;
    }

    th, td {
      padding: 10px 12px;
      border-bottom: 1px solid #e2e8f0;
      text-align: left;
    }

    td.num {
      text-align: right;
    }

    tr.total {
      font-weight: bold;
      background-color: #f7fafc;
    }

    .error-message {
      border-radius: 16px;
      padding: 16px 20px;
      background: #fef2f2;
      color: #b91c1c;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1><a href="/" style="color: inherit; text-decoration: none;">{{TITLE}}</a></h1>
    </header>
    {{BODY}}
  </main>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MemberPayload;
    use crate::percent::ZeroTotal;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn member_page_lists_rows_and_total() {
        let payload = MemberPayload {
            title: Some("สมาชิก <ทั้งหมด>".to_string()),
            x: vec![Some("a".to_string()), Some("b".to_string()), Some("c".to_string())],
            y: vec![Some(1000), Some(1000), Some(1000)],
        };
        let report = MemberReport::build(payload, date(), ZeroTotal::LastAbsorbs).unwrap();
        let html = render_member_page(date(), Ok(&report));

        assert!(html.contains("<td>33.34%</td>"));
        assert!(html.contains("<td class=\"num\">3,000</td>"));
        assert!(html.contains("<td>100.00%</td>"));
        assert!(html.contains("สมาชิก &lt;ทั้งหมด&gt;"));
        assert!(html.contains("/reports/members/export?date=2024-05-01"));
        assert!(html.contains("1 พ.ค. 2567"));
    }

    #[test]
    fn error_page_keeps_the_form() {
        let err = AppError::bad_gateway("เกิดข้อผิดพลาด: boom", "ลองใหม่");
        let end = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();
        let html = render_learner_page(LearnerKind::Courses, date(), end, Err(&err));

        assert!(html.contains("action=\"/reports/courses\""));
        assert!(html.contains("เกิดข้อผิดพลาด: boom"));
        assert!(html.contains("ลองใหม่"));
        assert!(!html.contains("table-body"));
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }
}
