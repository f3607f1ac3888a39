use credit_calculator_core::prelude::*;
use std::env;

fn main() -> Result<()> {
    let mut store = CalculatorStore::new();

    let args: Vec<String> = env::args().collect();

    // Use a results export if one was given, otherwise configure a few messages by hand
    if args.len() >= 2 {
        let file_path = &args[1];
        println!("Importing results from: {}", file_path);
        let summary = store.import_results_file(file_path)?;
        println!("Updated {} message types", summary.updated_count);
    } else {
        let welcome = "new-member-activation-After-Join---Welcome";
        let birthday = "habituation-repeat-visits-Birthday-Message";

        store.update_message_type(
            welcome,
            MessageTypeUpdate::new()
                .frequency(Frequency::Weekly)
                .audience(ChannelKind::Sms, 1_000)
                .audience(ChannelKind::Email, 5_000),
        );
        store.update_message_type(
            birthday,
            MessageTypeUpdate::new().audience(ChannelKind::Push, 20_000),
        );
        store.toggle_message_type_selected(welcome);
        store.toggle_message_type_selected(birthday);
    }

    println!("\n--- Credit Rates ---");
    for kind in ChannelKind::ALL {
        println!("{}: {} credits/message", kind, store.credit_rates().get(kind));
    }

    println!("\n--- Selected Message Types ---");
    for stage in store.journey_stages().iter().filter(|s| s.selected()) {
        println!(
            "{} ({} selected, {} credits/month)",
            stage.name(),
            store.selected_count(stage.id()),
            store.stage_credits(stage.id())
        );
        for mt in store.selected_message_types(stage.id()) {
            let credits = mt.credits();
            println!(
                "  {} [{}]: SMS {}, Email {}, Push {}",
                mt.name(),
                mt.frequency(),
                credits.sms(),
                credits.email(),
                credits.push()
            );
        }
    }

    let totals = store.totals();
    println!("\n--- Totals ---");
    println!("Monthly: {} credits", totals.grand());
    println!("Annual: {} credits", totals.annual());

    // Same numbers with SMS excluded
    store.set_channel_filters(ChannelFilters::new(false, true, true));
    println!(
        "Monthly without SMS: {} credits",
        store.totals().grand()
    );

    let options = ReportOptions::new(Utc::now());
    println!("\n--- {} ({}) ---", ReportKind::Results.title(), options.file_name(ReportKind::Results));
    println!(
        "{}",
        credit_calculator_core::render_report(ReportKind::Results, &store, &options)
    );

    Ok(())
}
