//! Output formatting for product records (table, JSON, markdown, CSV).

use crate::config::OutputFormat;
use crate::mobase::ProductRecord;

/// Formats product records for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a single record.
    pub fn format_record(&self, record: &ProductRecord) -> String {
        match self.format {
            OutputFormat::Json => self.json_single(record),
            OutputFormat::Table => self.table_single(record),
            OutputFormat::Markdown => self.markdown_single(record),
            OutputFormat::Csv => self.csv_records(std::slice::from_ref(record)),
        }
    }

    /// Formats multiple records.
    pub fn format_records(&self, records: &[ProductRecord]) -> String {
        if records.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => self.csv_header(),
                _ => "No records.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_records(records),
            OutputFormat::Table => self.table_records(records),
            OutputFormat::Markdown => self.markdown_records(records),
            OutputFormat::Csv => self.csv_records(records),
        }
    }

    // JSON formatting

    fn json_single(&self, record: &ProductRecord) -> String {
        serde_json::to_string_pretty(record).unwrap_or_else(|_| "{}".to_string())
    }

    fn json_records(&self, records: &[ProductRecord]) -> String {
        serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn table_single(&self, record: &ProductRecord) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Artikelnummer:    {}", record.identifier));
        lines.push(format!("Titel:            {}", record.title));
        lines.push(format!("Beschreibung:     {}", record.description));
        lines.push(format!("Werkstoff:        {}", record.material));
        lines.push(format!("Klassifizierung:  {}", record.material_classification));
        lines.push(format!("Bewertung:        {}", record.material_classification_assessment));
        lines.push(format!("Abmessungen:      {}", record.dimensions));
        lines.push(format!("Gewicht:          {}", record.weight));
        lines.push(format!("Weitere Nummern:  {}", record.alternate_article_numbers));
        lines.push(format!("Warennummer:      {}", record.statistical_commodity_code));
        lines.push(format!("Ursprungsland:    {}", record.country_of_origin));
        lines.push(format!("Verfügbarkeit:    {}", record.availability));
        lines.push(format!("Link:             {}", record.product_link));
        lines.push(format!("Status:           {}", record.status));

        if !record.error_type.is_empty() {
            lines.push(format!("Fehlertyp:        {}", record.error_type));
        }

        lines.join("\n")
    }

    fn table_records(&self, records: &[ProductRecord]) -> String {
        let article_width = 16;
        let material_width = 20;
        let weight_width = 12;
        let status_width = 14;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<article_width$}  {:<material_width$}  {:<weight_width$}  {:<status_width$}  {}",
            "Artikel", "Werkstoff", "Gewicht", "Status", "Titel"
        ));
        lines.push(format!(
            "{:-<article_width$}  {:-<material_width$}  {:-<weight_width$}  {:-<status_width$}  {:-<30}",
            "", "", "", "", ""
        ));

        for record in records {
            let material = Self::truncate(&record.material, material_width);
            let status = Self::truncate(&record.status, status_width);
            let title = Self::truncate(&record.title, 50);

            lines.push(format!(
                "{:<article_width$}  {:<material_width$}  {:<weight_width$}  {:<status_width$}  {}",
                record.identifier, material, record.weight, status, title
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} records", records.len()));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_single(&self, record: &ProductRecord) -> String {
        let mut lines = Vec::new();

        lines.push(format!("## {}", record.title));
        lines.push(String::new());

        lines.push(format!("- **Artikelnummer:** {}", record.identifier));
        lines.push(format!("- **Werkstoff:** {}", record.material));
        lines.push(format!("- **Klassifizierung:** {}", record.material_classification));
        lines.push(format!("- **Bewertung:** {}", record.material_classification_assessment));
        lines.push(format!("- **Abmessungen:** {}", record.dimensions));
        lines.push(format!("- **Gewicht:** {}", record.weight));
        lines.push(format!("- **Warennummer:** {}", record.statistical_commodity_code));
        lines.push(format!("- **Ursprungsland:** {}", record.country_of_origin));
        lines.push(format!("- **Verfügbarkeit:** {}", record.availability));
        lines.push(format!("- **Link:** [Produktseite]({})", record.product_link));
        lines.push(format!("- **Status:** {}", record.status));

        lines.join("\n")
    }

    fn markdown_records(&self, records: &[ProductRecord]) -> String {
        let mut lines = Vec::new();

        lines.push("| Artikel | Werkstoff | Gewicht | Abmessungen | Status |".to_string());
        lines.push("|---------|-----------|---------|-------------|--------|".to_string());

        for record in records {
            lines.push(format!(
                "| {} | {} | {} | {} | {} |",
                record.identifier,
                record.material,
                record.weight,
                record.dimensions,
                record.status
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} records*", records.len()));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        "identifier,title,description,material,alternate_article_numbers,dimensions,weight,material_classification,material_classification_assessment,statistical_commodity_code,country_of_origin,availability,product_link,source_url,status,error_type,scrape_timestamp"
            .to_string()
    }

    fn csv_records(&self, records: &[ProductRecord]) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for record in records {
            let fields = [
                &record.identifier,
                &record.title,
                &record.description,
                &record.material,
                &record.alternate_article_numbers,
                &record.dimensions,
                &record.weight,
                &record.material_classification,
                &record.material_classification_assessment,
                &record.statistical_commodity_code,
                &record.country_of_origin,
                &record.availability,
                &record.product_link,
                &record.source_url,
                &record.status,
                &record.error_type,
                &record.scrape_timestamp,
            ];

            let row: Vec<String> = fields.iter().map(|f| Self::csv_escape(f)).collect();
            lines.push(row.join(","));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }

    fn truncate(s: &str, max: usize) -> String {
        if s.chars().count() > max {
            let cut: String = s.chars().take(max.saturating_sub(3)).collect();
            format!("{}...", cut)
        } else {
            s.to_string()
        }
    }
}
