//! CSV report builders.
//!
//! Every report is a pure function of the store (plus a timestamp where the
//! report carries one). Cells are quoted only when they contain a comma or a
//! double quote, and rows are joined with `\n`.

use crate::catalog::{sanitize, Catalog};
use crate::data_structures::{Channel, ChannelKind, MessageType};
use crate::import::RESULTS_HEADERS;
use crate::store::CalculatorStore;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use std::borrow::Cow;

macro_rules! row {
    ($($cell:expr),* $(,)?) => {
        vec![$($cell.to_string()),*]
    };
}

pub const DEFAULT_CONFIG_NAME: &str = "credit-calculator-config";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Results,
    Simple,
    Detailed,
    Template,
    Breakdown,
    BlankTemplate,
}

impl ReportKind {
    pub const ALL: [ReportKind; 6] = [
        ReportKind::Results,
        ReportKind::Simple,
        ReportKind::Detailed,
        ReportKind::Template,
        ReportKind::Breakdown,
        ReportKind::BlankTemplate,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::Results => "Export Results",
            ReportKind::Simple => "Simple Credit Report",
            ReportKind::Detailed => "Detailed Credit Report",
            ReportKind::Template => "Current Message Configuration",
            ReportKind::Breakdown => "Message Breakdown with Credits",
            ReportKind::BlankTemplate => "Blank Template for Completion",
        }
    }

    /// File name stem; the configuration template is named after the
    /// user-supplied configuration name.
    pub fn file_stem(&self, config_name: Option<&str>) -> String {
        match self {
            ReportKind::Results => "journey-credit-results".to_string(),
            ReportKind::Simple => "credit-calculation".to_string(),
            ReportKind::Detailed => "credit-calculation-detailed".to_string(),
            ReportKind::Template => sanitize(config_name_or_default(config_name)),
            ReportKind::Breakdown => "credit-calculator-breakdown".to_string(),
            ReportKind::BlankTemplate => "credit-calculator-template".to_string(),
        }
    }

    pub fn file_name(&self, date: NaiveDate, config_name: Option<&str>) -> String {
        format!(
            "{}-{}.csv",
            self.file_stem(config_name),
            date.format("%Y-%m-%d")
        )
    }
}

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub generated_at: DateTime<Utc>,
    pub config_name: Option<String>,
}

impl ReportOptions {
    pub fn new(generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            config_name: None,
        }
    }

    pub fn with_config_name(mut self, name: impl Into<String>) -> Self {
        self.config_name = Some(name.into());
        self
    }

    pub fn file_name(&self, kind: ReportKind) -> String {
        kind.file_name(self.generated_at.date_naive(), self.config_name.as_deref())
    }
}

fn config_name_or_default(name: Option<&str>) -> &str {
    match name.map(str::trim) {
        Some(name) if !name.is_empty() => name,
        _ => DEFAULT_CONFIG_NAME,
    }
}

/// Quotes `cell` when it contains a comma or a quote, doubling inner quotes.
pub fn escape_cell(cell: &str) -> Cow<'_, str> {
    if cell.contains(',') || cell.contains('"') {
        Cow::Owned(format!("\"{}\"", cell.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(cell)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CsvSheet {
    rows: Vec<Vec<String>>,
}

impl CsvSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn push_blank(&mut self) {
        self.rows.push(vec![String::new()]);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn to_csv(&self) -> String {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| escape_cell(cell))
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn render_report(kind: ReportKind, store: &CalculatorStore, options: &ReportOptions) -> String {
    match kind {
        ReportKind::Results => results_csv(store),
        ReportKind::Simple => simple_report_csv(store, options.generated_at),
        ReportKind::Detailed => detailed_report_csv(store, options.generated_at),
        ReportKind::Template => configuration_csv(
            store,
            config_name_or_default(options.config_name.as_deref()),
            options.generated_at,
        ),
        ReportKind::Breakdown => breakdown_csv(store, options.generated_at),
        ReportKind::BlankTemplate => blank_template_csv(store.catalog()),
    }
}

fn local_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn audience_or(channel: &Channel, fallback: &str) -> String {
    if channel.enabled() {
        channel.audience_size().to_string()
    } else {
        fallback.to_string()
    }
}

fn selected_by_stage(store: &CalculatorStore) -> Vec<(&str, Vec<&MessageType>)> {
    store
        .journey_stages()
        .iter()
        .filter(|stage| stage.selected())
        .map(|stage| {
            (
                stage.name(),
                store.selected_message_types(stage.id()).collect::<Vec<_>>(),
            )
        })
        .filter(|(_, message_types)| !message_types.is_empty())
        .collect()
}

/// Round-trip format: one row per message type, selected or not.
pub fn results_csv(store: &CalculatorStore) -> String {
    let mut sheet = CsvSheet::new();
    sheet.push_row(RESULTS_HEADERS.iter().map(|h| h.to_string()).collect());

    for mt in store.message_types() {
        let channels = mt.channels();
        sheet.push_row(row![
            store.stage_name(mt.journey_stage_id()).unwrap_or_default(),
            mt.name(),
            channels.sms().audience_size(),
            channels.email().audience_size(),
            channels.push().audience_size(),
        ]);
    }

    sheet.to_csv()
}

pub fn simple_report_csv(store: &CalculatorStore, generated_at: DateTime<Utc>) -> String {
    let totals = store.totals();
    let rates = store.credit_rates();
    let mut sheet = CsvSheet::new();

    sheet.push_row(row!["Credit Calculator Export"]);
    sheet.push_row(row!["Generated:", local_timestamp(generated_at)]);
    sheet.push_blank();

    sheet.push_row(row!["Credit Rates"]);
    sheet.push_row(row!["Channel", "Credits per Message"]);
    for kind in ChannelKind::ALL {
        sheet.push_row(row![kind.name(), rates.get(kind)]);
    }
    sheet.push_blank();

    sheet.push_row(row!["Monthly Credit Totals Summary"]);
    sheet.push_row(row!["Channel", "Monthly Credits"]);
    for kind in ChannelKind::ALL {
        sheet.push_row(row![kind.name(), totals.get(kind)]);
    }
    sheet.push_row(row!["Total Monthly Credits", totals.grand()]);
    sheet.push_row(row!["Total Annual Credits", totals.annual()]);
    sheet.push_blank();

    sheet.push_row(row!["Detailed Breakdown by Journey Stage"]);
    sheet.push_blank();

    for (stage_name, message_types) in selected_by_stage(store) {
        sheet.push_row(row![stage_name]);
        sheet.push_row(row![
            "Message Type",
            "Frequency",
            "SMS Audience",
            "Email Audience",
            "Push Audience",
            "SMS Credits/Month",
            "Email Credits/Month",
            "Push Credits/Month",
            "Total Monthly Credits",
        ]);

        let mut stage_total: u64 = 0;
        for mt in message_types {
            let credits = mt.credits();
            stage_total = credits.total().saturating_add(stage_total);
            let channels = mt.channels();
            sheet.push_row(row![
                mt.name(),
                mt.frequency(),
                audience_or(channels.sms(), "N/A"),
                audience_or(channels.email(), "N/A"),
                audience_or(channels.push(), "N/A"),
                credits.sms(),
                credits.email(),
                credits.push(),
                credits.total(),
            ]);
        }

        sheet.push_row(row!["", "", "", "", "", "", "", "Stage Total:", stage_total]);
        sheet.push_blank();
    }

    sheet.push_row(row!["", "", "", "", "", "", "", "Grand Total:", totals.grand()]);
    sheet.to_csv()
}

pub fn detailed_report_csv(store: &CalculatorStore, generated_at: DateTime<Utc>) -> String {
    let totals = store.totals();
    let rates = store.credit_rates();
    let mut sheet = CsvSheet::new();

    sheet.push_row(row!["MONTHLY CREDIT CALCULATION SUMMARY"]);
    sheet.push_row(row!["Generated", local_timestamp(generated_at)]);
    sheet.push_blank();

    sheet.push_row(row!["EXECUTIVE SUMMARY"]);
    for kind in ChannelKind::ALL {
        sheet.push_row(row![
            format!("Total Monthly {} Credits", kind.name()),
            totals.get(kind)
        ]);
    }
    sheet.push_row(row!["TOTAL MONTHLY CREDITS REQUIRED", totals.grand()]);
    sheet.push_row(row!["TOTAL ANNUAL CREDITS REQUIRED", totals.annual()]);
    sheet.push_blank();

    sheet.push_row(row!["CREDIT RATES (per message)"]);
    for kind in ChannelKind::ALL {
        sheet.push_row(row![format!("{} Rate", kind.name()), rates.get(kind)]);
    }
    sheet.push_blank();

    sheet.push_row(row!["DETAILED BREAKDOWN BY JOURNEY STAGE AND MESSAGE TYPE"]);
    sheet.push_row(row![
        "Journey Stage",
        "Message Type",
        "Frequency",
        "SMS Audience",
        "Email Audience",
        "Push Audience",
        "SMS Monthly Credits",
        "Email Monthly Credits",
        "Push Monthly Credits",
        "Total Monthly Credits",
    ]);

    for (stage_name, message_types) in selected_by_stage(store) {
        let mut stage_total: u64 = 0;
        for (index, mt) in message_types.iter().enumerate() {
            let credits = mt.credits();
            stage_total = credits.total().saturating_add(stage_total);
            let channels = mt.channels();
            let credit_cell = |kind: ChannelKind| {
                if channels.get(kind).enabled() {
                    credits.get(kind).to_string()
                } else {
                    String::new()
                }
            };
            sheet.push_row(row![
                if index == 0 { stage_name } else { "" },
                mt.name(),
                mt.frequency(),
                audience_or(channels.sms(), ""),
                audience_or(channels.email(), ""),
                audience_or(channels.push(), ""),
                credit_cell(ChannelKind::Sms),
                credit_cell(ChannelKind::Email),
                credit_cell(ChannelKind::Push),
                credits.total(),
            ]);
        }

        sheet.push_row(row![
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            format!("{} Subtotal:", stage_name),
            stage_total,
        ]);
    }

    sheet.push_row(row!["", "", "", "", "", "", "", "", "GRAND TOTAL:", totals.grand()]);
    sheet.to_csv()
}

const TEMPLATE_HEADERS: [&str; 7] = [
    "Journey Stage",
    "Message Type",
    "Frequency",
    "Use This Message",
    "SMS Audience",
    "Email Audience",
    "Push Audience",
];

fn audience_or_empty(audience_size: u64) -> String {
    if audience_size > 0 {
        audience_size.to_string()
    } else {
        String::new()
    }
}

/// Selected message types as a fill-in template, grouped by stage in
/// catalog order.
pub fn configuration_csv(
    store: &CalculatorStore,
    name: &str,
    generated_at: DateTime<Utc>,
) -> String {
    let mut sheet = CsvSheet::new();

    sheet.push_row(row!["Credit Calculator Configuration"]);
    sheet.push_row(row!["Name:", name]);
    sheet.push_row(row!["Created:", iso_timestamp(generated_at)]);
    sheet.push_blank();
    sheet.push_row(TEMPLATE_HEADERS.iter().map(|h| h.to_string()).collect());

    for stage in store.catalog().stages() {
        let selected: Vec<&MessageType> = store.selected_message_types(stage.id()).collect();
        if selected.is_empty() {
            continue;
        }

        for (index, mt) in selected.iter().enumerate() {
            let channels = mt.channels();
            sheet.push_row(row![
                if index == 0 { stage.name() } else { "" },
                mt.name(),
                mt.frequency(),
                "TRUE",
                audience_or_empty(channels.sms().audience_size()),
                audience_or_empty(channels.email().audience_size()),
                audience_or_empty(channels.push().audience_size()),
            ]);
        }
        sheet.push_blank();
    }

    sheet.to_csv()
}

pub fn breakdown_csv(store: &CalculatorStore, generated_at: DateTime<Utc>) -> String {
    let mut sheet = CsvSheet::new();

    sheet.push_row(row!["Credit Calculator - Message Breakdown"]);
    sheet.push_row(row!["Generated:", iso_timestamp(generated_at)]);
    sheet.push_blank();
    sheet.push_row(row![
        "Journey Stage",
        "Message Type",
        "Frequency",
        "SMS Audience",
        "Email Audience",
        "Push Audience",
        "SMS Credits",
        "Email Credits",
        "Push Credits",
        "Total Credits",
    ]);

    for stage in store.catalog().stages() {
        let selected: Vec<&MessageType> = store.selected_message_types(stage.id()).collect();
        if selected.is_empty() {
            continue;
        }

        for (index, mt) in selected.iter().enumerate() {
            let channels = mt.channels();
            let credits = store.calculate_credits(mt);
            sheet.push_row(row![
                if index == 0 { stage.name() } else { "" },
                mt.name(),
                mt.frequency(),
                channels.sms().audience_size(),
                channels.email().audience_size(),
                channels.push().audience_size(),
                format!("{:.2}", credits.sms() as f64),
                format!("{:.2}", credits.email() as f64),
                format!("{:.2}", credits.push() as f64),
                format!("{:.2}", credits.total() as f64),
            ]);
        }
        sheet.push_blank();
    }

    let totals = store.totals();
    sheet.push_blank();
    sheet.push_row(row![
        "TOTALS",
        "",
        "",
        "",
        "",
        "",
        format!("{:.2}", totals.sms() as f64),
        format!("{:.2}", totals.email() as f64),
        format!("{:.2}", totals.push() as f64),
        format!("{:.2}", totals.grand() as f64),
    ]);

    sheet.to_csv()
}

/// Every catalog message type, unselected and with empty audiences, for
/// completion offline.
pub fn blank_template_csv(catalog: &Catalog) -> String {
    let mut sheet = CsvSheet::new();

    sheet.push_row(row!["Credit Calculator Template"]);
    sheet.push_row(row![
        "Instructions: Fill out audience sizes and select message types to use"
    ]);
    sheet.push_blank();
    sheet.push_row(TEMPLATE_HEADERS.iter().map(|h| h.to_string()).collect());
    sheet.push_row(row![
        "Instructions:",
        "Leave as-is",
        "daily/weekly/monthly/quarterly",
        "TRUE or FALSE",
        "Enter number",
        "Enter number",
        "Enter number",
    ]);
    sheet.push_blank();

    for stage in catalog.stages() {
        for (index, name) in stage.message_types().iter().enumerate() {
            sheet.push_row(row![
                if index == 0 { stage.name() } else { "" },
                name,
                "monthly",
                "FALSE",
                "",
                "",
                "",
            ]);
        }
        sheet.push_blank();
    }

    sheet.to_csv()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::{ChannelFilters, Frequency, MessageTypeUpdate};
    use chrono::TimeZone;

    const WELCOME: &str = "new-member-activation-After-Join---Welcome";
    const BIRTHDAY: &str = "habituation-repeat-visits-Birthday-Message";

    fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap()
    }

    fn configured_store() -> CalculatorStore {
        let mut store = CalculatorStore::new();
        store.update_message_type(
            WELCOME,
            MessageTypeUpdate::new()
                .frequency(Frequency::Weekly)
                .audience(ChannelKind::Sms, 1000),
        );
        store.update_message_type(
            BIRTHDAY,
            MessageTypeUpdate::new()
                .audience(ChannelKind::Email, 2000)
                .audience(ChannelKind::Push, 400),
        );
        store.toggle_message_type_selected(WELCOME);
        store.toggle_message_type_selected(BIRTHDAY);
        store
    }

    fn lines(csv: &str) -> Vec<&str> {
        csv.split('\n').collect()
    }

    #[test]
    fn test_escape_cell() {
        assert_eq!(escape_cell("plain"), "plain");
        assert_eq!(escape_cell("a,b"), "\"a,b\"");
        assert_eq!(escape_cell("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_cell(""), "");
    }

    #[test]
    fn test_sheet_blank_rows() {
        let mut sheet = CsvSheet::new();
        sheet.push_row(row!["a", 1]);
        sheet.push_blank();
        sheet.push_row(row!["b", "x,y"]);
        assert_eq!(sheet.len(), 3);
        assert_eq!(sheet.to_csv(), "a,1\n\nb,\"x,y\"");
    }

    #[test]
    fn test_file_names() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(
            ReportKind::Results.file_name(date, None),
            "journey-credit-results-2024-03-15.csv"
        );
        assert_eq!(
            ReportKind::Detailed.file_name(date, None),
            "credit-calculation-detailed-2024-03-15.csv"
        );
        assert_eq!(
            ReportKind::Template.file_name(date, Some("Q3 plan/v2")),
            "Q3-plan-v2-2024-03-15.csv"
        );
        assert_eq!(
            ReportKind::Template.file_name(date, Some("  ")),
            "credit-calculator-config-2024-03-15.csv"
        );
        let options = ReportOptions::new(generated_at());
        assert_eq!(
            options.file_name(ReportKind::BlankTemplate),
            "credit-calculator-template-2024-03-15.csv"
        );
    }

    #[test]
    fn test_results_lists_every_message_type() {
        let store = configured_store();
        let csv = results_csv(&store);
        let lines = lines(&csv);

        assert_eq!(
            lines[0],
            "Journey Stage,Message Type,SMS Audience Size,Email Audience Size,Push Audience Size"
        );
        assert_eq!(lines.len(), 1 + 22);
        assert_eq!(lines[1], "New Member Activation,After Join / Welcome,1000,0,0");
        assert!(lines.contains(&"Habituation & Repeat Visits,Birthday Message,0,2000,400"));
        assert!(lines.contains(&"Churn Risk / Re-engagement,Winback - 45 Days,0,0,0"));
    }

    #[test]
    fn test_simple_report() {
        let store = configured_store();
        let csv = simple_report_csv(&store, generated_at());
        let lines = lines(&csv);

        assert_eq!(lines[0], "Credit Calculator Export");
        assert_eq!(lines[1], "Generated:,2024-03-15 09:30:00 UTC");
        assert_eq!(lines[2], "");
        assert!(lines.contains(&"SMS,1"));
        assert!(lines.contains(&"Email,0.1"));
        assert!(lines.contains(&"Push,0.05"));
        // 4330 + 200 + 20
        assert!(lines.contains(&"Total Monthly Credits,4550"));
        assert!(lines.contains(&"Total Annual Credits,54600"));
        assert!(lines.contains(&"After Join / Welcome,weekly,1000,N/A,N/A,4330,0,0,4330"));
        assert!(lines.contains(&"Birthday Message,monthly,N/A,2000,400,0,200,20,220"));
        assert!(lines.contains(&",,,,,,,Stage Total:,4330"));
        assert!(lines.contains(&",,,,,,,Stage Total:,220"));
        assert_eq!(*lines.last().unwrap(), ",,,,,,,Grand Total:,4550");
    }

    #[test]
    fn test_simple_report_skips_unselected_stages() {
        let store = configured_store();
        let csv = simple_report_csv(&store, generated_at());
        assert!(!csv.contains("Churn Risk / Re-engagement"));
        assert!(!csv.contains("First Visit Reminder"));
    }

    #[test]
    fn test_detailed_report() {
        let mut store = configured_store();
        store.update_message_type(
            "new-member-activation-First-Visit-Reminder",
            MessageTypeUpdate::new().audience(ChannelKind::Sms, 10),
        );
        store.toggle_message_type_selected("new-member-activation-First-Visit-Reminder");

        let csv = detailed_report_csv(&store, generated_at());
        let lines = lines(&csv);

        assert_eq!(lines[0], "MONTHLY CREDIT CALCULATION SUMMARY");
        assert!(lines.contains(&"Total Monthly SMS Credits,4340"));
        assert!(lines.contains(&"TOTAL MONTHLY CREDITS REQUIRED,4560"));
        assert!(lines.contains(&"SMS Rate,1"));
        assert!(lines.contains(
            &"New Member Activation,After Join / Welcome,weekly,1000,,,4330,,,4330"
        ));
        assert!(lines.contains(&",First Visit Reminder,monthly,10,,,10,,,10"));
        assert!(lines.contains(&",,,,,,,,New Member Activation Subtotal:,4340"));
        assert!(lines.contains(&",,,,,,,,Habituation & Repeat Visits Subtotal:,220"));
        assert_eq!(*lines.last().unwrap(), ",,,,,,,,GRAND TOTAL:,4560");
    }

    #[test]
    fn test_configuration_template() {
        let store = configured_store();
        let csv = configuration_csv(&store, "Spring, 2024", generated_at());
        let lines = lines(&csv);

        assert_eq!(lines[0], "Credit Calculator Configuration");
        assert_eq!(lines[1], "Name:,\"Spring, 2024\"");
        assert_eq!(lines[2], "Created:,2024-03-15T09:30:00.000Z");
        assert_eq!(
            lines[4],
            "Journey Stage,Message Type,Frequency,Use This Message,SMS Audience,Email Audience,Push Audience"
        );
        assert_eq!(lines[5], "New Member Activation,After Join / Welcome,weekly,TRUE,1000,,");
        assert_eq!(lines[6], "");
        assert_eq!(
            lines[7],
            "Habituation & Repeat Visits,Birthday Message,monthly,TRUE,,2000,400"
        );
        assert_eq!(lines[8], "");
        assert_eq!(lines.len(), 9);
    }

    #[test]
    fn test_breakdown() {
        let mut store = configured_store();
        store.set_channel_filters(ChannelFilters::new(true, true, false));

        let csv = breakdown_csv(&store, generated_at());
        let lines = lines(&csv);

        assert_eq!(lines[0], "Credit Calculator - Message Breakdown");
        assert_eq!(lines[1], "Generated:,2024-03-15T09:30:00.000Z");
        assert!(lines.contains(
            &"New Member Activation,After Join / Welcome,weekly,1000,0,0,4330.00,0.00,0.00,4330.00"
        ));
        assert!(lines.contains(
            &"Habituation & Repeat Visits,Birthday Message,monthly,0,2000,400,0.00,200.00,0.00,200.00"
        ));
        assert_eq!(
            *lines.last().unwrap(),
            "TOTALS,,,,,,4330.00,200.00,0.00,4530.00"
        );
    }

    #[test]
    fn test_blank_template_lists_whole_catalog() {
        let catalog = Catalog::new();
        let csv = blank_template_csv(&catalog);
        let lines = lines(&csv);

        assert_eq!(lines[0], "Credit Calculator Template");
        assert_eq!(
            lines[4],
            "Instructions:,Leave as-is,daily/weekly/monthly/quarterly,TRUE or FALSE,Enter number,Enter number,Enter number"
        );
        let message_rows: Vec<&&str> = lines.iter().filter(|l| l.contains(",monthly,FALSE,")).collect();
        assert_eq!(message_rows.len(), catalog.message_type_count());
        assert!(lines.contains(&"New Member Activation,After Join / Welcome,monthly,FALSE,,,"));
        assert!(lines.contains(&",First Visit Reminder,monthly,FALSE,,,"));
    }

    #[test]
    fn test_blank_template_ignores_store_state() {
        let store = configured_store();
        let options = ReportOptions::new(generated_at());
        assert_eq!(
            render_report(ReportKind::BlankTemplate, &store, &options),
            blank_template_csv(&Catalog::new())
        );
    }

    #[test]
    fn test_render_template_uses_default_name() {
        let store = configured_store();
        let options = ReportOptions::new(generated_at());
        let csv = render_report(ReportKind::Template, &store, &options);
        assert!(csv.contains("Name:,credit-calculator-config"));

        let named = options.with_config_name("Holiday");
        let csv = render_report(ReportKind::Template, &store, &named);
        assert!(csv.contains("Name:,Holiday"));
    }
}
