//! Subject, in-app message and HTML body for low-stock alerts.

use crate::model::ReagentSnapshot;

pub const LOW_STOCK_TITLE: &str = "Low Stock Alert";

pub fn low_stock_subject(reagent: &ReagentSnapshot) -> String {
    format!("⚠️ Low Stock Alert: {}", reagent.name)
}

/// The in-app notification text.
pub fn low_stock_message(reagent: &ReagentSnapshot) -> String {
    let location = match &reagent.machine_name {
        Some(machine) => format!("{} - {}", reagent.category_name, machine),
        None => reagent.category_name.clone(),
    };
    format!(
        "{} ({}) is running low. Current: {} {}, Minimum: {}",
        reagent.name, location, reagent.current_stock, reagent.unit, reagent.minimum_stock
    )
}

pub fn low_stock_html(reagent: &ReagentSnapshot) -> String {
    let name = escape(&reagent.name);
    let unit = escape(&reagent.unit);
    let machine_row = reagent
        .machine_name
        .as_deref()
        .map(|machine| info_row("Machine:", &escape(machine), None))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <style>
    body {{ font-family: Arial, sans-serif; background: #f5f5f5; padding: 20px; }}
    .container {{ max-width: 500px; margin: 0 auto; background: white; border-radius: 10px; overflow: hidden; }}
    .header {{ background: #dc2626; color: white; padding: 20px; text-align: center; }}
    .content {{ padding: 20px; }}
    .alert-box {{ background: #fef2f2; border: 2px solid #dc2626; border-radius: 8px; padding: 15px; margin: 15px 0; }}
    .info-row {{ display: flex; justify-content: space-between; padding: 8px 0; border-bottom: 1px solid #eee; }}
    .warning {{ background: #fef3c7; border: 1px solid #f59e0b; padding: 15px; border-radius: 8px; margin-top: 15px; text-align: center; }}
    .footer {{ text-align: center; padding: 15px; color: #666; font-size: 12px; background: #f9f9f9; }}
  </style>
</head>
<body>
  <div class="container">
    <div class="header"><h1>⚠️ LOW STOCK ALERT</h1></div>
    <div class="content">
      <div class="alert-box">
        <h2 style="margin: 0 0 10px 0; color: #dc2626;">{name}</h2>
{category_row}{machine_row}{current_row}{minimum_row}      </div>
      <div class="warning"><strong>ACTION REQUIRED:</strong> Please restock this reagent as soon as possible.</div>
    </div>
    <div class="footer">Lab Inventory Management System</div>
  </div>
</body>
</html>
"#,
        category_row = info_row("Category:", &escape(&reagent.category_name), None),
        current_row = info_row(
            "Current Stock:",
            &format!("{} {unit}", reagent.current_stock),
            Some("color: #dc2626;"),
        ),
        minimum_row = info_row(
            "Minimum Required:",
            &format!("{} {unit}", reagent.minimum_stock),
            None,
        ),
    )
}

fn info_row(label: &str, value: &str, style: Option<&str>) -> String {
    let style = style
        .map(|s| format!(r#" style="{s}""#))
        .unwrap_or_default();
    format!(
        "        <div class=\"info-row\"><span>{label}</span><strong{style}>{value}</strong></div>\n"
    )
}

fn escape(text: &str) -> String {
    text.chars()
        .fold(String::with_capacity(text.len()), |mut out, c| {
            match c {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '"' => out.push_str("&quot;"),
                '\'' => out.push_str("&#39;"),
                _ => out.push(c),
            }
            out
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReagentId;

    fn snapshot(machine: Option<&str>) -> ReagentSnapshot {
        ReagentSnapshot {
            reagent_id: ReagentId(1),
            name: "CBC Diluent".into(),
            category_name: "Hematology".into(),
            machine_name: machine.map(str::to_string),
            current_stock: 4,
            minimum_stock: 5,
            unit: "bottles".into(),
        }
    }

    #[test]
    fn message_names_the_machine_when_there_is_one() {
        assert_eq!(
            low_stock_message(&snapshot(Some("Sysmex XN-1000"))),
            "CBC Diluent (Hematology - Sysmex XN-1000) is running low. Current: 4 bottles, Minimum: 5"
        );
        assert_eq!(
            low_stock_message(&snapshot(None)),
            "CBC Diluent (Hematology) is running low. Current: 4 bottles, Minimum: 5"
        );
    }

    #[test]
    fn html_lists_stock_levels_and_escapes_names() {
        let mut reagent = snapshot(None);
        reagent.name = "Buffer <A&B>".into();
        let html = low_stock_html(&reagent);

        assert!(html.contains("Buffer &lt;A&amp;B&gt;"));
        assert!(html.contains("4 bottles"));
        assert!(html.contains("Minimum Required:"));
        assert!(!html.contains("Machine:"));
        assert_eq!(low_stock_subject(&reagent), "⚠️ Low Stock Alert: Buffer <A&B>");
    }
}
