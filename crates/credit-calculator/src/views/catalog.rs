use credit_calculator_core::CalculatorStore;

pub struct CatalogView;

impl CatalogView {
    pub fn render(store: &CalculatorStore) -> String {
        let mut out = String::new();

        for stage in store.journey_stages() {
            out.push_str(&format!("{} [{}]\n", stage.name(), stage.id()));
            for mt in store.stage_message_types(stage.id()) {
                out.push_str(&format!("  - {:<32} {}\n", mt.name(), mt.id()));
            }
        }

        out
    }
}
