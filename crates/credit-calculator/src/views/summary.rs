use credit_calculator_core::{CalculatorStore, ChannelKind};

use super::format_number;

pub struct SummaryView;

impl SummaryView {
    pub fn render(store: &CalculatorStore) -> String {
        let mut out = String::new();
        let rates = store.credit_rates();
        let filters = store.channel_filters();

        let rate_line: Vec<String> = ChannelKind::ALL
            .iter()
            .map(|kind| format!("{} {}", kind, rates.get(*kind)))
            .collect();
        out.push_str(&format!("Credit rates: {}\n", rate_line.join(" | ")));

        let filter_line: Vec<String> = ChannelKind::ALL
            .iter()
            .map(|kind| {
                format!(
                    "{} {}",
                    kind,
                    if filters.get(*kind) { "on" } else { "off" }
                )
            })
            .collect();
        out.push_str(&format!("Channels: {}\n", filter_line.join(" | ")));

        let selected_stages: Vec<_> = store
            .journey_stages()
            .iter()
            .filter(|stage| stage.selected())
            .collect();

        if selected_stages.is_empty() {
            out.push_str("\nNo message types selected.\n");
        }

        for stage in selected_stages {
            out.push_str(&format!(
                "\n{} ({} selected)\n",
                stage.name(),
                store.selected_count(stage.id())
            ));
            for mt in store.selected_message_types(stage.id()) {
                let credits = mt.credits();
                out.push_str(&format!(
                    "  {:<32} {:<10} SMS {:>10}  Email {:>10}  Push {:>10}  = {:>10}\n",
                    mt.name(),
                    mt.frequency(),
                    format_number(credits.sms()),
                    format_number(credits.email()),
                    format_number(credits.push()),
                    format_number(credits.total())
                ));
            }
            out.push_str(&format!(
                "  Stage total: {} credits/month\n",
                format_number(store.stage_credits(stage.id()))
            ));
        }

        let totals = store.totals();
        out.push_str("\nMonthly credits\n");
        for kind in ChannelKind::ALL {
            out.push_str(&format!(
                "  {:<6} {:>12}\n",
                kind.name(),
                format_number(totals.get(kind))
            ));
        }
        out.push_str(&format!("  {:<6} {:>12}\n", "Total", format_number(totals.grand())));
        out.push_str(&format!("Annual credits: {}\n", format_number(totals.annual())));

        out
    }
}
