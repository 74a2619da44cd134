use super::csv_parser::{OPTIONAL_HEADERS, REQUIRED_HEADERS};

/// Имя файла шаблона для скачивания
pub const TEMPLATE_FILE_NAME: &str = "product_import_template.csv";

/// Примеры строк: по одной на каждое действие
const SAMPLE_ROWS: [[&str; 11]; 3] = [
    [
        "add",
        "SKU-001",
        "Example Brand",
        "Example Product",
        "Product description",
        "10.50",
        "19.99",
        "Black",
        "M",
        "Apparel",
        "https://example.com/images/sku-001.jpg",
    ],
    [
        "update",
        "SKU-002",
        "Example Brand",
        "Updated Product Name",
        "Updated description",
        "12.00",
        "24.99",
        "White",
        "L",
        "Apparel",
        "",
    ],
    ["remove", "SKU-003", "", "", "", "", "", "", "", "", ""],
];

/// Сформировать CSV шаблон (заголовок совпадает с контрактом разбора)
pub fn csv_template() -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let header: Vec<&str> = REQUIRED_HEADERS
        .iter()
        .chain(OPTIONAL_HEADERS.iter())
        .copied()
        .collect();
    writer.write_record(&header)?;

    for row in SAMPLE_ROWS.iter() {
        writer.write_record(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to finalize CSV template: {}", e.error()))?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::u501_bulk_product_import::csv_parser::parse_csv;
    use contracts::usecases::u501_bulk_product_import::ImportAction;

    #[test]
    fn test_template_header() {
        let template = csv_template().unwrap();
        let first_line = template.lines().next().unwrap();
        assert_eq!(
            first_line,
            "action,sku,brand,product_name,description,cost_price,selling_price,color,size,category,image_url"
        );
    }

    #[test]
    fn test_template_parses_without_errors() {
        let template = csv_template().unwrap();
        let outcome = parse_csv(&template);

        assert!(outcome.errors.is_empty(), "{:?}", outcome.errors);
        assert_eq!(outcome.records.len(), 3);

        let actions: Vec<_> = outcome
            .records
            .iter()
            .map(|r| r.parsed_action().unwrap())
            .collect();
        assert_eq!(
            actions,
            vec![ImportAction::Add, ImportAction::Update, ImportAction::Remove]
        );

        let add = &outcome.records[0];
        assert_eq!(add.brand, "Example Brand");
        assert_eq!(add.cost_price, Some(10.5));
        assert_eq!(add.selling_price, Some(19.99));

        let remove = &outcome.records[2];
        assert_eq!(remove.sku, "SKU-003");
        assert!(remove.brand.is_empty());
        assert!(remove.product_name.is_empty());
    }
}
