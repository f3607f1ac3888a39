use crate::calculator::Calculator;
use crate::catalog::{message_type_id, Catalog};
use crate::data_structures::{
    ChannelCredits, ChannelFilters, Channels, CreditRates, CreditTotals, Frequency, JourneyStage,
    MessageType, MessageTypeUpdate,
};
use crate::error::ImportError;
use crate::import::{parse_results, read_results_file, ResultsRow};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    pub updated_count: usize,
    pub skipped_rows: usize,
}

/// Single owner of the calculator's runtime model.
///
/// Every configuration change goes through a method here, and each of them
/// refreshes the cached `credits` of the message types it touches, so a
/// reader never sees credits computed from stale inputs.
pub struct CalculatorStore {
    catalog: Catalog,
    credit_rates: CreditRates,
    channel_filters: ChannelFilters,
    journey_stages: Vec<JourneyStage>,
    message_types: Vec<MessageType>,
    expanded_stages: BTreeSet<String>,
    calculator: Calculator,
}

impl CalculatorStore {
    pub fn new() -> Self {
        Self::from_catalog(Catalog::new())
    }

    pub fn from_catalog(catalog: Catalog) -> Self {
        let journey_stages = catalog
            .stages()
            .iter()
            .map(|stage| JourneyStage::new(stage.id().to_string(), stage.name().to_string()))
            .collect();

        let message_types = catalog
            .stages()
            .iter()
            .flat_map(|stage| {
                stage.message_types().iter().map(move |name| {
                    MessageType::new(
                        message_type_id(stage.id(), name),
                        stage.id().to_string(),
                        name.clone(),
                    )
                })
            })
            .collect();

        let mut store = Self {
            catalog,
            credit_rates: CreditRates::default(),
            channel_filters: ChannelFilters::default(),
            journey_stages,
            message_types,
            expanded_stages: BTreeSet::new(),
            calculator: Calculator::new(),
        };
        store.recalculate_credits();
        store
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn credit_rates(&self) -> &CreditRates {
        &self.credit_rates
    }

    pub fn channel_filters(&self) -> &ChannelFilters {
        &self.channel_filters
    }

    pub fn journey_stages(&self) -> &[JourneyStage] {
        &self.journey_stages
    }

    pub fn message_types(&self) -> &[MessageType] {
        &self.message_types
    }

    pub fn expanded_stages(&self) -> &BTreeSet<String> {
        &self.expanded_stages
    }

    pub fn message_type(&self, id: &str) -> Option<&MessageType> {
        self.message_types.iter().find(|mt| mt.id() == id)
    }

    pub fn journey_stage(&self, id: &str) -> Option<&JourneyStage> {
        self.journey_stages.iter().find(|stage| stage.id() == id)
    }

    pub fn stage_message_types<'a>(
        &'a self,
        stage_id: &'a str,
    ) -> impl Iterator<Item = &'a MessageType> + 'a {
        self.message_types
            .iter()
            .filter(move |mt| mt.journey_stage_id() == stage_id)
    }

    pub fn selected_message_types<'a>(
        &'a self,
        stage_id: &'a str,
    ) -> impl Iterator<Item = &'a MessageType> + 'a {
        self.stage_message_types(stage_id)
            .filter(|mt| mt.selected())
    }

    pub fn selected_count(&self, stage_id: &str) -> usize {
        self.selected_message_types(stage_id).count()
    }

    pub fn set_credit_rates(&mut self, rates: CreditRates) {
        self.credit_rates = rates.sanitized();
        self.recalculate_credits();
    }

    pub fn set_channel_filters(&mut self, filters: ChannelFilters) {
        self.channel_filters = filters;
        self.recalculate_credits();
    }

    /// Flips selection of a message type. Returns `false` for unknown ids,
    /// which leave the store untouched.
    pub fn toggle_message_type_selected(&mut self, id: &str) -> bool {
        let Some(message_type) = self.message_types.iter_mut().find(|mt| mt.id() == id) else {
            debug!(id, "Ignoring toggle for unknown message type");
            return false;
        };
        let selected = !message_type.selected();
        message_type.set_selected(selected);
        self.refresh_stage_selection();
        true
    }

    /// Merges `update` into a message type and recomputes its credits.
    /// Returns `false` for unknown ids.
    pub fn update_message_type(&mut self, id: &str, update: MessageTypeUpdate) -> bool {
        let Some(index) = self.message_types.iter().position(|mt| mt.id() == id) else {
            debug!(id, "Ignoring update for unknown message type");
            return false;
        };

        let message_type = &mut self.message_types[index];
        if let Some(frequency) = update.frequency {
            message_type.set_frequency(frequency);
        }
        let channels = update.merge_channels(message_type.channels());
        message_type.set_channels(channels);
        self.refresh_credits(index);
        true
    }

    pub fn set_expanded_stages(&mut self, expanded_stages: BTreeSet<String>) {
        self.expanded_stages = expanded_stages;
    }

    pub fn reset(&mut self) {
        self.credit_rates = CreditRates::default();
        self.channel_filters = ChannelFilters::default();
        self.expanded_stages.clear();
        for stage in &mut self.journey_stages {
            stage.set_selected(false);
        }
        for message_type in &mut self.message_types {
            message_type.set_selected(false);
            message_type.set_frequency(Frequency::Monthly);
            message_type.set_channels(Channels::default());
        }
        self.recalculate_credits();
    }

    pub fn calculate_credits(&self, message_type: &MessageType) -> ChannelCredits {
        self.calculator
            .calculate_credits(message_type, &self.credit_rates, &self.channel_filters)
    }

    pub fn totals(&self) -> CreditTotals {
        self.calculator.total_credits(
            &self.message_types,
            &self.credit_rates,
            &self.channel_filters,
        )
    }

    pub fn stage_credits(&self, stage_id: &str) -> u64 {
        self.calculator.calculate_stage_credits(
            &self.message_types,
            stage_id,
            &self.credit_rates,
            &self.channel_filters,
        )
    }

    pub fn stage_name(&self, stage_id: &str) -> Option<&str> {
        self.journey_stage(stage_id).map(|stage| stage.name())
    }

    /// Applies an exported results CSV.
    ///
    /// The whole file is tokenized and validated before anything changes,
    /// so a format error leaves the store exactly as it was. Rows that do
    /// not name a known (stage, message type) pair are skipped.
    pub fn import_results(&mut self, csv_text: &str) -> Result<ImportSummary, ImportError> {
        let parsed = match parse_results(csv_text) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "Rejected results import");
                return Err(e);
            }
        };

        let mut summary = ImportSummary {
            updated_count: 0,
            skipped_rows: parsed.malformed_rows,
        };

        for row in &parsed.rows {
            match self.find_imported_message_type(row) {
                Some(index) => {
                    self.apply_results_row(index, row);
                    summary.updated_count += 1;
                }
                None => {
                    debug!(
                        stage = %row.stage_name,
                        message_type = %row.message_type,
                        "No catalog entry for imported row"
                    );
                    summary.skipped_rows += 1;
                }
            }
        }

        self.refresh_stage_selection();
        info!(
            updated = summary.updated_count,
            skipped = summary.skipped_rows,
            "Imported results"
        );
        Ok(summary)
    }

    pub fn import_results_file<P: AsRef<Path>>(
        &mut self,
        path: P,
    ) -> Result<ImportSummary, ImportError> {
        let text = read_results_file(&path).inspect_err(|e| {
            error!(path = %path.as_ref().display(), error = %e, "Failed to read results file");
        })?;
        self.import_results(&text)
    }

    fn find_imported_message_type(&self, row: &ResultsRow) -> Option<usize> {
        let stage = self.catalog.stage_by_name(&row.stage_name)?;
        self.message_types
            .iter()
            .position(|mt| mt.journey_stage_id() == stage.id() && mt.name() == row.message_type)
    }

    fn apply_results_row(&mut self, index: usize, row: &ResultsRow) {
        let channels =
            Channels::with_audiences(row.sms_audience, row.email_audience, row.push_audience);
        let message_type = &mut self.message_types[index];
        message_type.set_selected(channels.has_audience());
        message_type.set_channels(channels);
        self.refresh_credits(index);
    }

    fn refresh_credits(&mut self, index: usize) {
        let credits = self.calculator.calculate_credits(
            &self.message_types[index],
            &self.credit_rates,
            &self.channel_filters,
        );
        self.message_types[index].set_credits(credits);
    }

    fn recalculate_credits(&mut self) {
        for index in 0..self.message_types.len() {
            self.refresh_credits(index);
        }
        debug!(count = self.message_types.len(), "Recalculated message credits");
    }

    fn refresh_stage_selection(&mut self) {
        let message_types = &self.message_types;
        for stage in &mut self.journey_stages {
            let selected = message_types
                .iter()
                .any(|mt| mt.journey_stage_id() == stage.id() && mt.selected());
            stage.set_selected(selected);
        }
    }
}

impl Default for CalculatorStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Expansion set for showing one stage at a time: clicking the expanded
/// stage collapses it, clicking any other stage expands only that one.
pub fn exclusive_expansion(current: &BTreeSet<String>, stage_id: &str) -> BTreeSet<String> {
    let mut next = BTreeSet::new();
    if !current.contains(stage_id) {
        next.insert(stage_id.to_string());
    }
    next
}
