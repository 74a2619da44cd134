use contracts::usecases::u501_bulk_product_import::{ImportAction, ImportRecord};

/// Обязательные колонки заголовка (в нижнем регистре)
pub const REQUIRED_HEADERS: [&str; 4] = ["action", "sku", "brand", "product_name"];

/// Необязательные колонки заголовка
pub const OPTIONAL_HEADERS: [&str; 7] = [
    "description",
    "cost_price",
    "selling_price",
    "color",
    "size",
    "category",
    "image_url",
];

/// Результат разбора CSV: строки и ошибки валидации
///
/// Строка с ошибками все равно попадает в `records`; отправка разрешена
/// только при пустом `errors`.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub records: Vec<ImportRecord>,
    pub errors: Vec<String>,
}

impl ParseOutcome {
    pub fn can_submit(&self) -> bool {
        self.errors.is_empty() && !self.records.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Action,
    Sku,
    Brand,
    ProductName,
    Description,
    CostPrice,
    SellingPrice,
    Color,
    Size,
    Category,
    ImageUrl,
}

impl Field {
    fn from_header(header: &str) -> Option<Self> {
        match header {
            "action" => Some(Field::Action),
            "sku" => Some(Field::Sku),
            "brand" => Some(Field::Brand),
            "product_name" => Some(Field::ProductName),
            "description" => Some(Field::Description),
            "cost_price" => Some(Field::CostPrice),
            "selling_price" => Some(Field::SellingPrice),
            "color" => Some(Field::Color),
            "size" => Some(Field::Size),
            "category" => Some(Field::Category),
            "image_url" => Some(Field::ImageUrl),
            _ => None,
        }
    }
}

/// Ячейки одной строки, разложенные по колонкам (пустая строка = нет значения)
#[derive(Debug, Clone, Default)]
struct RawRow<'a> {
    line: usize,
    action: &'a str,
    sku: &'a str,
    brand: &'a str,
    product_name: &'a str,
    description: &'a str,
    cost_price: &'a str,
    selling_price: &'a str,
    color: &'a str,
    size: &'a str,
    category: &'a str,
    image_url: &'a str,
}

impl<'a> RawRow<'a> {
    fn set(&mut self, field: Field, value: &'a str) {
        let slot = match field {
            Field::Action => &mut self.action,
            Field::Sku => &mut self.sku,
            Field::Brand => &mut self.brand,
            Field::ProductName => &mut self.product_name,
            Field::Description => &mut self.description,
            Field::CostPrice => &mut self.cost_price,
            Field::SellingPrice => &mut self.selling_price,
            Field::Color => &mut self.color,
            Field::Size => &mut self.size,
            Field::Category => &mut self.category,
            Field::ImageUrl => &mut self.image_url,
        };
        // При повторяющихся колонках берется первая
        if slot.is_empty() {
            *slot = value;
        }
    }

    fn validate(&self, errors: &mut Vec<String>) {
        let line = self.line;

        if self.action.is_empty() {
            errors.push(format!("Line {}: Action is required", line));
        } else {
            match ImportAction::parse(self.action) {
                None => errors.push(format!(
                    "Line {}: Invalid action \"{}\". Must be one of: add, update, remove",
                    line, self.action
                )),
                Some(action) if action.requires_details() => {
                    if self.brand.is_empty() {
                        errors.push(format!(
                            "Line {}: Brand is required for {} action",
                            line, action
                        ));
                    }
                    if self.product_name.is_empty() {
                        errors.push(format!(
                            "Line {}: Product name is required for {} action",
                            line, action
                        ));
                    }
                }
                Some(_) => {}
            }
        }

        if self.sku.is_empty() {
            errors.push(format!("Line {}: SKU is required", line));
        }

        for (column, value) in [
            ("cost_price", self.cost_price),
            ("selling_price", self.selling_price),
        ] {
            if !value.is_empty() && parse_number(value).is_none() {
                errors.push(format!(
                    "Line {}: {} must be a valid number (got \"{}\")",
                    line, column, value
                ));
            }
        }
    }

    fn to_record(&self) -> ImportRecord {
        ImportRecord {
            line: self.line,
            action: self.action.to_string(),
            sku: self.sku.to_string(),
            brand: self.brand.to_string(),
            product_name: self.product_name.to_string(),
            description: non_empty(self.description),
            cost_price: parse_number(self.cost_price),
            selling_price: parse_number(self.selling_price),
            color: non_empty(self.color),
            size: non_empty(self.size),
            category: non_empty(self.category),
            image_url: non_empty(self.image_url),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Числа принимаются только конечные: "NaN" и "inf" считаются ошибкой
fn parse_number(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Разбить одну физическую строку на ячейки (кавычки внутри строки поддерживаются)
fn split_line(builder: &csv::ReaderBuilder, line: &str) -> Result<Vec<String>, csv::Error> {
    let mut reader = builder.from_reader(line.as_bytes());
    match reader.records().next() {
        Some(record) => Ok(record?.iter().map(|cell| cell.trim().to_string()).collect()),
        None => Ok(Vec::new()),
    }
}

/// Разобрать и провалидировать CSV с товарами
///
/// Первая строка: заголовок. Пустые строки (в том числе состоящие только
/// из запятых) пропускаются без ошибок. Строки без action или sku считаются
/// шумом и тоже пропускаются. Номера строк в ошибках физические (1-based).
pub fn parse_csv(csv_text: &str) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();

    // Strip UTF-8 BOM if present
    let text = csv_text.trim_start_matches('\u{FEFF}');
    if text.trim().is_empty() {
        outcome.errors.push("CSV payload is empty".to_string());
        return outcome;
    }

    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(false).flexible(true).trim(csv::Trim::All);

    let mut lines = text.lines().enumerate();

    let headers: Vec<String> = match lines.next() {
        Some((_, line)) => match split_line(&builder, line) {
            Ok(cells) => cells.iter().map(|h| h.to_lowercase()).collect(),
            Err(e) => {
                outcome
                    .errors
                    .push(format!("Failed to read CSV header: {}", e));
                return outcome;
            }
        },
        None => Vec::new(),
    };

    let missing: Vec<&str> = REQUIRED_HEADERS
        .iter()
        .copied()
        .filter(|required| !headers.iter().any(|h| h == required))
        .collect();
    if !missing.is_empty() {
        outcome.errors.push(format!(
            "Missing required headers: {}",
            missing.join(", ")
        ));
        return outcome;
    }

    let columns: Vec<Option<Field>> = headers.iter().map(|h| Field::from_header(h)).collect();

    for (idx, line) in lines {
        let line_no = idx + 1;
        let cells = match split_line(&builder, line) {
            Ok(cells) => cells,
            Err(e) => {
                tracing::warn!("Malformed CSV row at line {}: {}", line_no, e);
                outcome
                    .errors
                    .push(format!("Line {}: Malformed row: {}", line_no, e));
                continue;
            }
        };

        if cells.iter().all(|cell| cell.is_empty()) {
            continue;
        }

        let mut raw = RawRow {
            line: line_no,
            ..RawRow::default()
        };
        for (cell, column) in cells.iter().zip(columns.iter()) {
            if let Some(field) = column {
                raw.set(*field, cell);
            }
        }

        if raw.action.is_empty() || raw.sku.is_empty() {
            tracing::debug!("Skipping line {}: no action or sku", line_no);
            continue;
        }

        raw.validate(&mut outcome.errors);
        outcome.records.push(raw.to_record());
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "action,sku,brand,product_name,description,cost_price,selling_price,color,size,category,image_url";

    #[test]
    fn test_missing_header_returns_single_error() {
        let outcome = parse_csv("action,sku,product_name\nadd,S1,Lamp\n");
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].contains("brand"));
        assert!(!outcome.errors[0].contains("sku"));
    }

    #[test]
    fn test_missing_several_headers_listed_in_one_error() {
        let outcome = parse_csv("foo,bar\n1,2\n");
        assert!(outcome.records.is_empty());
        assert_eq!(
            outcome.errors,
            vec!["Missing required headers: action, sku, brand, product_name".to_string()]
        );
    }

    #[test]
    fn test_headers_are_case_insensitive_and_trimmed() {
        let outcome = parse_csv(" ACTION , Sku,BRAND, Product_Name \nadd,S1,Acme,Lamp\n");
        assert!(outcome.errors.is_empty(), "{:?}", outcome.errors);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].brand, "Acme");
    }

    #[test]
    fn test_blank_lines_are_skipped_silently() {
        let text = format!("{}\n\n,,,,,,,,,,\n   ,  , ,\nadd,S1,Acme,Lamp\n\n", HEADER);
        let outcome = parse_csv(&text);
        assert!(outcome.errors.is_empty(), "{:?}", outcome.errors);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].line, 5);
    }

    #[test]
    fn test_add_without_brand_is_error() {
        let outcome = parse_csv("action,sku,brand,product_name\nadd,S1,,P\n");
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].contains("Brand is required for add action"));
        assert!(outcome.errors[0].starts_with("Line 2:"));
    }

    #[test]
    fn test_update_without_product_name_is_error() {
        let outcome = parse_csv("action,sku,brand,product_name\nupdate,S1,Acme,\n");
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].contains("Product name is required for update action"));
    }

    #[test]
    fn test_remove_needs_only_sku() {
        let outcome = parse_csv("action,sku,brand,product_name\nremove,S1,,\n");
        assert!(outcome.errors.is_empty(), "{:?}", outcome.errors);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].parsed_action(), Some(ImportAction::Remove));
    }

    #[test]
    fn test_non_numeric_price_is_error_for_every_action() {
        for action in ["add", "update", "remove"] {
            let text = format!(
                "action,sku,brand,product_name,cost_price\n{},S1,Acme,Lamp,abc\n",
                action
            );
            let outcome = parse_csv(&text);
            assert_eq!(outcome.errors.len(), 1, "action {}", action);
            assert!(outcome.errors[0].contains("cost_price must be a valid number"));
            assert_eq!(outcome.records[0].cost_price, None);
        }
    }

    #[test]
    fn test_nan_and_infinity_are_not_numbers() {
        let outcome = parse_csv(
            "action,sku,brand,product_name,cost_price,selling_price\nadd,S1,Acme,Lamp,NaN,inf\n",
        );
        assert_eq!(outcome.errors.len(), 2);
    }

    #[test]
    fn test_prices_parsed() {
        let outcome = parse_csv(
            "action,sku,brand,product_name,cost_price,selling_price\nadd,S1,Acme,Lamp,10.5,19\n",
        );
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.records[0].cost_price, Some(10.5));
        assert_eq!(outcome.records[0].selling_price, Some(19.0));
    }

    #[test]
    fn test_invalid_action_is_error() {
        let outcome = parse_csv("action,sku,brand,product_name\ndelete,S1,Acme,Lamp\n");
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].contains("Invalid action \"delete\""));
    }

    #[test]
    fn test_rows_without_action_or_sku_are_noise() {
        let outcome = parse_csv("action,sku,brand,product_name\n,S1,Acme,Lamp\nadd,,Acme,Lamp\n");
        assert!(outcome.records.is_empty());
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn test_unknown_headers_ignored_and_positional_mapping() {
        let outcome = parse_csv("sku,warehouse,action,product_name,brand\nS1,W-9,add,Lamp,Acme\n");
        assert!(outcome.errors.is_empty());
        let record = &outcome.records[0];
        assert_eq!(record.sku, "S1");
        assert_eq!(record.action, "add");
        assert_eq!(record.product_name, "Lamp");
        assert_eq!(record.brand, "Acme");
    }

    #[test]
    fn test_short_rows_leave_fields_empty() {
        let outcome = parse_csv(&format!("{}\nadd,S1,Acme,Lamp\n", HEADER));
        assert!(outcome.errors.is_empty());
        let record = &outcome.records[0];
        assert_eq!(record.description, None);
        assert_eq!(record.image_url, None);
    }

    #[test]
    fn test_bom_and_crlf_accepted() {
        let outcome = parse_csv("\u{FEFF}action,sku,brand,product_name\r\nadd,S1,Acme,Lamp\r\n");
        assert!(outcome.errors.is_empty(), "{:?}", outcome.errors);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].product_name, "Lamp");
    }

    #[test]
    fn test_empty_payload() {
        let outcome = parse_csv("");
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.errors, vec!["CSV payload is empty".to_string()]);
        assert!(!outcome.can_submit());
    }

    #[test]
    fn test_records_with_errors_are_still_returned() {
        let outcome = parse_csv("action,sku,brand,product_name\nadd,S1,,\nadd,S2,Acme,Lamp\n");
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.errors.len(), 2);
        assert!(!outcome.can_submit());
    }

    #[test]
    fn test_row_without_action_and_sku_reports_both() {
        let raw = RawRow {
            line: 7,
            ..RawRow::default()
        };
        let mut errors = Vec::new();
        raw.validate(&mut errors);
        assert_eq!(
            errors,
            vec![
                "Line 7: Action is required".to_string(),
                "Line 7: SKU is required".to_string(),
            ]
        );
    }
}
