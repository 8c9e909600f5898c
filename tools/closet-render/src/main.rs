//! レコメンデーション JSON を HTML に変換するツール
//!
//! data/recommendations/<id>.json とテンプレートを読み、固定プレース
//! ホルダの置換だけで HTML を組み立てる。状態は持たない。
//!
//! 使い方:
//!     closet-render rec_20251005_001
//!     closet-render rec_20251005_001 --output custom_name.html
//!     closet-render rec_20251005_001 --base-dir /path/to/project

use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process;

/// 色名 -> 表示用カラーコード（未知の色は #CCCCCC）
const COLOR_MAP: &[(&str, &str)] = &[
    ("light blue", "#87CEEB"),
    ("dark grey", "#4A5568"),
    ("dark gray", "#4A5568"),
    ("tan", "#D2B48C"),
    ("brown", "#8B4513"),
    ("navy", "#001f3f"),
    ("navy blue", "#001f3f"),
    ("grey", "#718096"),
    ("gray", "#718096"),
    ("black", "#000000"),
    ("white", "#FFFFFF"),
    ("olive green", "#556B2F"),
    ("olive", "#556B2F"),
    ("beige", "#F5F5DC"),
    ("burgundy", "#800020"),
    ("red", "#DC143C"),
    ("blue", "#4169E1"),
    ("indigo", "#4B0082"),
    ("light purple", "#D8BFD8"),
    ("burnt orange", "#CC5500"),
    ("yellow", "#FFD700"),
    ("teal blue", "#008080"),
    ("khaki", "#C3B091"),
];

const FALLBACK_COLOR: &str = "#CCCCCC";

/// テンプレート中の単一アウトフィット節。複数アウトフィット形式では
/// この節全体を生成済み HTML で置き換える。
const OUTFIT_SECTION_TEMPLATE: &str = r#"<div class="section">
    <h2 class="section-title">👔 The Outfit</h2>
    <div class="outfit-grid">
        {{OUTFIT_ITEMS}}
    </div>
    <div class="stats-bar">
        <div class="stat">
            <div class="stat-value">{{FORMALITY_LEVEL}}</div>
            <div class="stat-label">Formality Level</div>
        </div>
        <div class="stat">
            <div class="stat-value">{{CONFIDENCE_SCORE}}%</div>
            <div class="stat-label">Confidence Score</div>
        </div>
        <div class="stat">
            <div class="stat-value">{{ITEMS_COUNT}}</div>
            <div class="stat-label">Items Used</div>
        </div>
    </div>
</div>"#;

/// カラーパレット節。各アウトフィット内に統合するため丸ごと除去する。
const COLOR_SECTION_TEMPLATE: &str = r#"<div class="section">
    <h2 class="section-title">🎨 Color Palette</h2>
    <div class="reasoning-box">
        <div class="color-palette">
            {{COLOR_SWATCHES}}
        </div>
        <p class="color-strategy"><strong>Color Strategy:</strong> {{COLOR_STRATEGY}}</p>
    </div>
</div>"#;

fn fail(msg: &str) -> ! {
    eprintln!("closet-render: {}", msg);
    process::exit(1);
}

fn color_code(name: &str) -> &'static str {
    let lower = name.to_lowercase();
    COLOR_MAP
        .iter()
        .find(|(n, _)| *n == lower)
        .map(|(_, code)| *code)
        .unwrap_or(FALLBACK_COLOR)
}

/// 各単語の先頭を大文字にする（Python の str.title 相当）
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for ch in s.chars() {
        if ch.is_alphanumeric() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

fn str_of<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

fn read_json(path: &Path) -> Value {
    let s = std::fs::read_to_string(path)
        .unwrap_or_else(|e| fail(&format!("cannot read {}: {}", path.display(), e)));
    serde_json::from_str(&s)
        .unwrap_or_else(|e| fail(&format!("cannot parse {}: {}", path.display(), e)))
}

/// アイテム ID -> 画像パスの対応表をフルストアから引く
fn load_image_map(items_path: &Path) -> HashMap<String, String> {
    let data = read_json(items_path);
    let mut map = HashMap::new();
    if let Some(items) = data.get("items").and_then(Value::as_array) {
        for item in items {
            let Some(id) = str_of(item, "id") else { continue };
            let image = str_of(item, "imagePath").unwrap_or("");
            map.insert(id.to_string(), image.to_string());
        }
    }
    map
}

/// コンテキストバー（場面・気温・時間帯・気分）
fn build_context_html(context: &Value) -> String {
    let occasion = str_of(context, "occasion").unwrap_or("Occasion");
    let time = str_of(context, "timeOfDay").unwrap_or("day");
    let weather = context.get("weather").cloned().unwrap_or(Value::Null);
    let temp = weather
        .get("temperature")
        .map(|t| match t {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .unwrap_or_else(|| "?".to_string());
    let unit = str_of(&weather, "unit").unwrap_or("F");
    let unit_initial = unit
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_else(|| "F".to_string());

    let occasion_lower = occasion.to_lowercase();
    let icon = if occasion_lower.contains("dinner") || occasion_lower.contains("restaurant") {
        "🍝"
    } else if occasion_lower.contains("business") || occasion_lower.contains("meeting") {
        "💼"
    } else if occasion_lower.contains("date") {
        "💕"
    } else if occasion_lower.contains("casual") || occasion_lower.contains("weekend") {
        "👕"
    } else {
        "📅"
    };

    let mut html = format!(
        r#"
<div class="context-item">
    <span class="icon">{icon}</span>
    <span class="label">{occasion}</span>
</div>
<div class="context-item">
    <span class="icon">🌡️</span>
    <span class="label">{temp}°{unit}</span>
</div>
<div class="context-item">
    <span class="icon">🕐</span>
    <span class="label">{time}</span>
</div>
"#,
        icon = icon,
        occasion = title_case(occasion),
        temp = temp,
        unit = unit_initial,
        time = title_case(time),
    );

    if let Some(mood) = str_of(context, "mood") {
        html.push_str(&format!(
            r#"
<div class="context-item">
    <span class="icon">😊</span>
    <span class="label">{}</span>
</div>
"#,
            title_case(mood)
        ));
    }

    html
}

/// 1 アウトフィット分の節（アイテムカード・統計・パレット）
fn build_outfit_section(
    outfit: &Value,
    outfit_name: &str,
    outfit_number: usize,
    image_map: &HashMap<String, String>,
) -> String {
    let mut items_html = String::new();
    let items = outfit
        .get("items")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    for item in &items {
        let id = str_of(item, "id").unwrap_or("");
        let name = str_of(item, "name").unwrap_or("");
        let img_path = image_map.get(id).map(String::as_str).unwrap_or("");
        let img_html = if img_path.is_empty() {
            r#"<span class="item-icon">👔</span>"#.to_string()
        } else {
            format!(r#"<img src="../../{}" alt="{}">"#, img_path, name)
        };

        items_html.push_str(&format!(
            r#"
        <div class="item-card">
            <div class="item-badge">{role}</div>
            <div class="item-image">{img}</div>
            <div class="item-name">{name}</div>
            <div class="item-meta">{category}</div>
            <div class="item-reason">{reason}</div>
        </div>
        "#,
            role = str_of(item, "role").unwrap_or(""),
            img = img_html,
            name = name,
            category = title_case(str_of(item, "category").unwrap_or("")),
            reason = str_of(item, "reason").unwrap_or(""),
        ));
    }

    let mut colors_html = String::new();
    let mut all_colors: Vec<String> = Vec::new();
    for key in ["dominantColors", "accentColors"] {
        if let Some(colors) = outfit.get(key).and_then(Value::as_array) {
            all_colors.extend(colors.iter().filter_map(Value::as_str).map(String::from));
        }
    }
    for color in &all_colors {
        colors_html.push_str(&format!(
            r#"
        <div class="color-swatch">
            <div class="color-circle" style="background-color: {code};"></div>
            <div class="color-name">{name}</div>
        </div>
        "#,
            code = color_code(color),
            name = title_case(color),
        ));
    }

    let icons = ["🌟", "✨", "💫"];
    let icon = icons.get(outfit_number.wrapping_sub(1)).copied().unwrap_or("👔");
    let formality = outfit
        .get("totalFormality")
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        r#"
    <div class="section outfit-option">
        <h2 class="section-title">{icon} Option {number}: {name}</h2>
        <div class="outfit-grid">
            {items}
        </div>
        <div class="stats-bar">
            <div class="stat">
                <div class="stat-value">{formality}</div>
                <div class="stat-label">Formality</div>
            </div>
            <div class="stat">
                <div class="stat-value">{count}</div>
                <div class="stat-label">Pieces</div>
            </div>
        </div>
        <div class="palette-block">
            <h3>Color Palette</h3>
            <div class="color-palette">{colors}</div>
        </div>
    </div>
    "#,
        icon = icon,
        number = outfit_number,
        name = outfit_name,
        items = items_html,
        formality = formality,
        count = items.len(),
        colors = colors_html,
    )
}

/// 単一形式（outfit.items）と複数形式（outfit.primary / alternative1 / alternative2）の両対応
fn build_all_outfits_html(rec: &Value, image_map: &HashMap<String, String>) -> String {
    let outfit = rec.get("outfit").cloned().unwrap_or(Value::Null);
    let mut html = String::new();

    if outfit.get("primary").is_some() {
        let slots = [
            ("primary", "Primary", 1),
            ("alternative1", "Alternative 1", 2),
            ("alternative2", "Alternative 2", 3),
        ];
        for (key, default_name, number) in slots {
            let Some(data) = outfit.get(key) else { continue };
            let has_items = data
                .get("items")
                .and_then(Value::as_array)
                .map(|a| !a.is_empty())
                .unwrap_or(false);
            if !has_items {
                continue;
            }
            let name = str_of(data, "name").unwrap_or(default_name);
            html.push_str(&build_outfit_section(data, name, number, image_map));
        }
    } else if outfit.get("items").is_some() {
        html = build_outfit_section(&outfit, "The Outfit", 1, image_map);
    }

    html
}

fn build_style_notes_html(reasoning: &Value) -> String {
    let mut html = String::new();
    if let Some(notes) = reasoning.get("styleNotes").and_then(Value::as_array) {
        for note in notes.iter().filter_map(Value::as_str) {
            html.push_str(&format!("<li>{}</li>\n", note));
        }
    }
    html
}

fn build_alternatives_html(alternatives: &Value) -> String {
    let mut html = String::new();
    if let Some(variations) = alternatives.get("variations").and_then(Value::as_array) {
        for alt in variations {
            html.push_str(&format!(
                r#"
    <div class="alt-card">
        <h4>{kind}</h4>
        <p><strong>{description}</strong></p>
        <p>{reason}</p>
    </div>
    "#,
                kind = title_case(str_of(alt, "type").unwrap_or("Alternative")),
                description = str_of(alt, "description").unwrap_or(""),
                reason = str_of(alt, "reason").unwrap_or(""),
            ));
        }
    }
    html
}

fn generate_html(base_dir: &Path, rec_id: &str, output: Option<&str>) -> PathBuf {
    let rec_path = base_dir
        .join("data/recommendations")
        .join(format!("{}.json", rec_id));
    let template_path = base_dir.join("templates/recommendations/recommendation.html");
    let items_path = base_dir.join("data/wardrobe/wardrobe_items.json");

    let rec = read_json(&rec_path);
    let template = std::fs::read_to_string(&template_path)
        .unwrap_or_else(|e| fail(&format!("cannot read {}: {}", template_path.display(), e)));
    let image_map = load_image_map(&items_path);

    let context = rec.get("context").cloned().unwrap_or(Value::Null);
    let occasion = str_of(&context, "occasion").unwrap_or("Outfit Recommendation");
    let reasoning = rec.get("reasoning").cloned().unwrap_or(Value::Null);

    let mut html = template;
    html = html.replace("{{HEADER_ICON}}", "👔");
    html = html.replace("{{OCCASION_TITLE}}", &title_case(occasion));
    html = html.replace(
        "{{RECOMMENDATION_ID}}",
        str_of(&rec, "id").unwrap_or(rec_id),
    );
    html = html.replace("{{CONTEXT_ITEMS}}", &build_context_html(&context));

    // アウトフィット節はテンプレートのブロックごと差し替え、
    // パレット節は各アウトフィットに統合済みなので除去する
    html = html.replace(
        OUTFIT_SECTION_TEMPLATE,
        &build_all_outfits_html(&rec, &image_map),
    );
    html = html.replace(COLOR_SECTION_TEMPLATE, "");

    html = html.replace(
        "{{OVERALL_REASONING}}",
        str_of(&reasoning, "overall").unwrap_or(""),
    );
    html = html.replace(
        "{{FORMALITY_REASONING}}",
        str_of(&reasoning, "formalityMatch").unwrap_or(""),
    );
    html = html.replace(
        "{{WEATHER_REASONING}}",
        str_of(&reasoning, "weatherAppropriateness").unwrap_or(""),
    );
    html = html.replace(
        "{{OCCASION_REASONING}}",
        str_of(&reasoning, "occasionFit").unwrap_or(""),
    );
    html = html.replace("{{STYLE_NOTES}}", &build_style_notes_html(&reasoning));
    html = html.replace(
        "{{ALTERNATIVES}}",
        &build_alternatives_html(&rec.get("alternatives").cloned().unwrap_or(Value::Null)),
    );

    let output_path = match output {
        Some(p) => PathBuf::from(p),
        None => base_dir
            .join("data/recommendations")
            .join(format!("{}.html", rec_id)),
    };
    std::fs::write(&output_path, html)
        .unwrap_or_else(|e| fail(&format!("cannot write {}: {}", output_path.display(), e)));
    output_path
}

fn print_usage() {
    eprintln!("Usage: closet-render <recommendation_id> [--output|-o <path>] [--base-dir <dir>]");
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut rec_id: Option<String> = None;
    let mut output: Option<String> = None;
    let mut base_dir = PathBuf::from(".");

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--output" | "-o" => {
                i += 1;
                match args.get(i) {
                    Some(v) => output = Some(v.clone()),
                    None => {
                        print_usage();
                        fail("--output requires a path");
                    }
                }
            }
            "--base-dir" => {
                i += 1;
                match args.get(i) {
                    Some(v) => base_dir = PathBuf::from(v),
                    None => {
                        print_usage();
                        fail("--base-dir requires a directory");
                    }
                }
            }
            "-h" | "--help" => {
                print_usage();
                return;
            }
            other if rec_id.is_none() => rec_id = Some(other.to_string()),
            other => {
                print_usage();
                fail(&format!("unexpected argument '{}'", other));
            }
        }
        i += 1;
    }

    let Some(rec_id) = rec_id else {
        print_usage();
        process::exit(64);
    };

    let output_path = generate_html(&base_dir, &rec_id, output.as_deref());
    println!("HTML generated: {}", output_path.display());
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_color_code_lookup() {
        assert_eq!(color_code("Navy"), "#001f3f");
        assert_eq!(color_code("navy blue"), "#001f3f");
        assert_eq!(color_code("chartreuse"), FALLBACK_COLOR);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("business dinner"), "Business Dinner");
        assert_eq!(title_case("NAVY"), "Navy");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_build_context_picks_icon_by_occasion() {
        let context = json!({
            "occasion": "business meeting",
            "timeOfDay": "evening",
            "weather": {"temperature": 72, "unit": "F"}
        });
        let html = build_context_html(&context);
        assert!(html.contains("💼"));
        assert!(html.contains("Business Meeting"));
        assert!(html.contains("72°F"));
    }

    #[test]
    fn test_build_all_outfits_single_format() {
        let rec = json!({
            "outfit": {
                "items": [
                    {"id": "i1", "name": "Blue Shirt", "role": "top", "category": "shirt", "reason": "fits"}
                ],
                "totalFormality": 5,
                "dominantColors": ["navy"]
            }
        });
        let html = build_all_outfits_html(&rec, &HashMap::new());
        assert!(html.contains("Option 1: The Outfit"));
        assert!(html.contains("Blue Shirt"));
        assert!(html.contains("#001f3f"));
    }

    #[test]
    fn test_build_all_outfits_multi_format_skips_empty() {
        let rec = json!({
            "outfit": {
                "primary": {
                    "name": "Sharp",
                    "items": [{"id": "i1", "name": "Shirt", "role": "top", "category": "shirt", "reason": "r"}]
                },
                "alternative1": {"items": []}
            }
        });
        let html = build_all_outfits_html(&rec, &HashMap::new());
        assert!(html.contains("Option 1: Sharp"));
        assert!(!html.contains("Option 2"));
    }
}
