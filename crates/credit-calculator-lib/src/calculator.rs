use crate::data_structures::{
    ChannelCredits, ChannelFilters, ChannelKind, Channels, CreditRates, CreditTotals, Frequency,
    MessageType,
};

pub struct Calculator;

impl Calculator {
    pub fn new() -> Self {
        Self
    }

    pub fn calculate_credits(
        &self,
        message_type: &MessageType,
        credit_rates: &CreditRates,
        channel_filters: &ChannelFilters,
    ) -> ChannelCredits {
        self.calculate_channel_credits(
            message_type.channels(),
            message_type.frequency(),
            credit_rates,
            channel_filters,
        )
    }

    pub fn calculate_channel_credits(
        &self,
        channels: &Channels,
        frequency: Frequency,
        credit_rates: &CreditRates,
        channel_filters: &ChannelFilters,
    ) -> ChannelCredits {
        let multiplier = frequency.monthly_multiplier();
        let credits_for = |kind: ChannelKind| -> u64 {
            let audience_size = channels.get(kind).audience_size();
            if audience_size == 0 || !channel_filters.get(kind) {
                return 0;
            }
            (audience_size as f64 * credit_rates.get(kind) * multiplier).round() as u64
        };

        ChannelCredits::new(
            credits_for(ChannelKind::Sms),
            credits_for(ChannelKind::Email),
            credits_for(ChannelKind::Push),
        )
    }

    /// Sums fresh credits over every selected message type. Unselected
    /// message types never contribute, whatever their configuration.
    pub fn total_credits(
        &self,
        message_types: &[MessageType],
        credit_rates: &CreditRates,
        channel_filters: &ChannelFilters,
    ) -> CreditTotals {
        message_types
            .iter()
            .filter(|message_type| message_type.selected())
            .fold(CreditTotals::default(), |mut totals, message_type| {
                totals.add(&self.calculate_credits(message_type, credit_rates, channel_filters));
                totals
            })
    }

    pub fn calculate_stage_credits(
        &self,
        message_types: &[MessageType],
        stage_id: &str,
        credit_rates: &CreditRates,
        channel_filters: &ChannelFilters,
    ) -> u64 {
        message_types
            .iter()
            .filter(|message_type| {
                message_type.selected() && message_type.journey_stage_id() == stage_id
            })
            .map(|message_type| {
                self.calculate_credits(message_type, credit_rates, channel_filters)
                    .total()
            })
            .fold(0, u64::saturating_add)
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}
