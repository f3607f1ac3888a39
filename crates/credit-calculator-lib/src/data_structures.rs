use crate::error::ParseValueError;
use crate::input::sanitize_rate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChannelKind {
    Sms,
    Email,
    Push,
}

impl ChannelKind {
    pub const ALL: [ChannelKind; 3] = [ChannelKind::Sms, ChannelKind::Email, ChannelKind::Push];

    pub fn name(&self) -> &'static str {
        match self {
            ChannelKind::Sms => "SMS",
            ChannelKind::Email => "Email",
            ChannelKind::Push => "Push",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            ChannelKind::Sms => "sms",
            ChannelKind::Email => "email",
            ChannelKind::Push => "push",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChannelKind {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sms" => Ok(ChannelKind::Sms),
            "email" => Ok(ChannelKind::Email),
            "push" => Ok(ChannelKind::Push),
            _ => Err(ParseValueError::UnknownChannel(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    Daily,
    Weekly,
    BiWeekly,
    #[default]
    Monthly,
    Quarterly,
}

impl Frequency {
    pub const ALL: [Frequency; 5] = [
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::BiWeekly,
        Frequency::Monthly,
        Frequency::Quarterly,
    ];

    /// Average number of sends per month for this cadence.
    pub fn monthly_multiplier(&self) -> f64 {
        match self {
            Frequency::Daily => 30.44,      // 365 / 12 days
            Frequency::Weekly => 4.33,      // 52 / 12 weeks
            Frequency::BiWeekly => 2.17,    // 26 / 12 fortnights
            Frequency::Monthly => 1.0,
            Frequency::Quarterly => 1.0 / 3.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::BiWeekly => "bi-weekly",
            Frequency::Monthly => "monthly",
            Frequency::Quarterly => "quarterly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "bi-weekly" | "biweekly" => Ok(Frequency::BiWeekly),
            "monthly" => Ok(Frequency::Monthly),
            "quarterly" => Ok(Frequency::Quarterly),
            _ => Err(ParseValueError::UnknownFrequency(s.to_string())),
        }
    }
}

/// A single delivery channel of a message type.
///
/// `enabled` is never stored independently of the audience: a channel is
/// enabled exactly when its audience is non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Channel {
    enabled: bool,
    audience_size: u64,
}

impl Channel {
    pub fn new(audience_size: u64) -> Self {
        Self {
            enabled: audience_size > 0,
            audience_size,
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn audience_size(&self) -> u64 {
        self.audience_size
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Channels {
    sms: Channel,
    email: Channel,
    push: Channel,
}

impl Channels {
    pub fn new(sms: Channel, email: Channel, push: Channel) -> Self {
        Self { sms, email, push }
    }

    pub fn with_audiences(sms: u64, email: u64, push: u64) -> Self {
        Self::new(Channel::new(sms), Channel::new(email), Channel::new(push))
    }

    pub fn get(&self, kind: ChannelKind) -> &Channel {
        match kind {
            ChannelKind::Sms => &self.sms,
            ChannelKind::Email => &self.email,
            ChannelKind::Push => &self.push,
        }
    }

    pub fn set(&mut self, kind: ChannelKind, channel: Channel) {
        match kind {
            ChannelKind::Sms => self.sms = channel,
            ChannelKind::Email => self.email = channel,
            ChannelKind::Push => self.push = channel,
        }
    }

    pub fn sms(&self) -> &Channel {
        &self.sms
    }

    pub fn email(&self) -> &Channel {
        &self.email
    }

    pub fn push(&self) -> &Channel {
        &self.push
    }

    pub fn has_audience(&self) -> bool {
        ChannelKind::ALL
            .iter()
            .any(|kind| self.get(*kind).audience_size() > 0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreditRates {
    pub sms: f64,
    pub email: f64,
    pub push: f64,
}

impl CreditRates {
    pub fn new(sms: f64, email: f64, push: f64) -> Self {
        Self {
            sms: sanitize_rate(sms),
            email: sanitize_rate(email),
            push: sanitize_rate(push),
        }
    }

    pub fn get(&self, kind: ChannelKind) -> f64 {
        match kind {
            ChannelKind::Sms => self.sms,
            ChannelKind::Email => self.email,
            ChannelKind::Push => self.push,
        }
    }

    pub fn set(&mut self, kind: ChannelKind, rate: f64) {
        let rate = sanitize_rate(rate);
        match kind {
            ChannelKind::Sms => self.sms = rate,
            ChannelKind::Email => self.email = rate,
            ChannelKind::Push => self.push = rate,
        }
    }

    pub(crate) fn sanitized(self) -> Self {
        Self::new(self.sms, self.email, self.push)
    }
}

impl Default for CreditRates {
    fn default() -> Self {
        Self {
            sms: 1.00,
            email: 0.10,
            push: 0.05,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelFilters {
    pub sms: bool,
    pub email: bool,
    pub push: bool,
}

impl ChannelFilters {
    pub fn new(sms: bool, email: bool, push: bool) -> Self {
        Self { sms, email, push }
    }

    pub fn get(&self, kind: ChannelKind) -> bool {
        match kind {
            ChannelKind::Sms => self.sms,
            ChannelKind::Email => self.email,
            ChannelKind::Push => self.push,
        }
    }

    pub fn set(&mut self, kind: ChannelKind, included: bool) {
        match kind {
            ChannelKind::Sms => self.sms = included,
            ChannelKind::Email => self.email = included,
            ChannelKind::Push => self.push = included,
        }
    }
}

impl Default for ChannelFilters {
    fn default() -> Self {
        Self {
            sms: true,
            email: true,
            push: true,
        }
    }
}

/// Monthly credits per channel, already rounded to whole credits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelCredits {
    sms: u64,
    email: u64,
    push: u64,
}

impl ChannelCredits {
    pub fn new(sms: u64, email: u64, push: u64) -> Self {
        Self { sms, email, push }
    }

    pub fn get(&self, kind: ChannelKind) -> u64 {
        match kind {
            ChannelKind::Sms => self.sms,
            ChannelKind::Email => self.email,
            ChannelKind::Push => self.push,
        }
    }

    pub fn sms(&self) -> u64 {
        self.sms
    }

    pub fn email(&self) -> u64 {
        self.email
    }

    pub fn push(&self) -> u64 {
        self.push
    }

    /// Saturates at `u64::MAX` rather than overflowing on huge audiences.
    pub fn total(&self) -> u64 {
        self.sms.saturating_add(self.email).saturating_add(self.push)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CreditTotals {
    sms: u64,
    email: u64,
    push: u64,
    grand: u64,
}

impl CreditTotals {
    pub fn new(sms: u64, email: u64, push: u64) -> Self {
        Self {
            sms,
            email,
            push,
            grand: sms.saturating_add(email).saturating_add(push),
        }
    }

    pub fn add(&mut self, credits: &ChannelCredits) {
        self.sms = self.sms.saturating_add(credits.sms);
        self.email = self.email.saturating_add(credits.email);
        self.push = self.push.saturating_add(credits.push);
        self.grand = self
            .sms
            .saturating_add(self.email)
            .saturating_add(self.push);
    }

    pub fn get(&self, kind: ChannelKind) -> u64 {
        match kind {
            ChannelKind::Sms => self.sms,
            ChannelKind::Email => self.email,
            ChannelKind::Push => self.push,
        }
    }

    pub fn sms(&self) -> u64 {
        self.sms
    }

    pub fn email(&self) -> u64 {
        self.email
    }

    pub fn push(&self) -> u64 {
        self.push
    }

    pub fn grand(&self) -> u64 {
        self.grand
    }

    pub fn annual(&self) -> u64 {
        self.grand.saturating_mul(12)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyStage {
    id: String,
    name: String,
    selected: bool,
}

impl JourneyStage {
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            selected: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn selected(&self) -> bool {
        self.selected
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageType {
    id: String,
    journey_stage_id: String,
    name: String,
    frequency: Frequency,
    selected: bool,
    channels: Channels,
    credits: ChannelCredits,
}

impl MessageType {
    pub fn new(id: String, journey_stage_id: String, name: String) -> Self {
        Self {
            id,
            journey_stage_id,
            name,
            frequency: Frequency::Monthly,
            selected: false,
            channels: Channels::default(),
            credits: ChannelCredits::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn journey_stage_id(&self) -> &str {
        &self.journey_stage_id
    }

    /// Display name, e.g. "Birthday Message".
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn selected(&self) -> bool {
        self.selected
    }

    pub fn channels(&self) -> &Channels {
        &self.channels
    }

    pub fn credits(&self) -> &ChannelCredits {
        &self.credits
    }

    pub(crate) fn set_frequency(&mut self, frequency: Frequency) {
        self.frequency = frequency;
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub(crate) fn set_channels(&mut self, channels: Channels) {
        self.channels = channels;
    }

    pub(crate) fn set_credits(&mut self, credits: ChannelCredits) {
        self.credits = credits;
    }
}

/// Partial configuration change for a message type. `None` leaves the
/// current value untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MessageTypeUpdate {
    pub frequency: Option<Frequency>,
    pub sms_audience: Option<u64>,
    pub email_audience: Option<u64>,
    pub push_audience: Option<u64>,
}

impl MessageTypeUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = Some(frequency);
        self
    }

    pub fn audience(mut self, kind: ChannelKind, audience_size: u64) -> Self {
        match kind {
            ChannelKind::Sms => self.sms_audience = Some(audience_size),
            ChannelKind::Email => self.email_audience = Some(audience_size),
            ChannelKind::Push => self.push_audience = Some(audience_size),
        }
        self
    }

    pub fn audience_for(&self, kind: ChannelKind) -> Option<u64> {
        match kind {
            ChannelKind::Sms => self.sms_audience,
            ChannelKind::Email => self.email_audience,
            ChannelKind::Push => self.push_audience,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.frequency.is_none()
            && ChannelKind::ALL
                .iter()
                .all(|kind| self.audience_for(*kind).is_none())
    }

    /// Applies the update on top of `channels`, rebuilding each touched
    /// channel so its enabled flag follows the new audience.
    pub fn merge_channels(&self, channels: &Channels) -> Channels {
        let mut merged = *channels;
        for kind in ChannelKind::ALL {
            if let Some(audience_size) = self.audience_for(kind) {
                merged.set(kind, Channel::new(audience_size));
            }
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_multipliers() {
        assert_eq!(Frequency::Daily.monthly_multiplier(), 30.44);
        assert_eq!(Frequency::Weekly.monthly_multiplier(), 4.33);
        assert_eq!(Frequency::BiWeekly.monthly_multiplier(), 2.17);
        assert_eq!(Frequency::Monthly.monthly_multiplier(), 1.0);
        assert_eq!(Frequency::Quarterly.monthly_multiplier(), 1.0 / 3.0);
    }

    #[test]
    fn test_frequency_parse_and_display() {
        for frequency in Frequency::ALL {
            assert_eq!(frequency.as_str().parse::<Frequency>().unwrap(), frequency);
        }
        assert_eq!("Bi-Weekly".parse::<Frequency>().unwrap(), Frequency::BiWeekly);
        assert!("hourly".parse::<Frequency>().is_err());
    }

    #[test]
    fn test_frequency_serde_names() {
        let json = serde_json::to_string(&Frequency::BiWeekly).unwrap();
        assert_eq!(json, "\"bi-weekly\"");
        let parsed: Frequency = serde_json::from_str("\"quarterly\"").unwrap();
        assert_eq!(parsed, Frequency::Quarterly);
    }

    #[test]
    fn test_channel_enabled_follows_audience() {
        assert!(Channel::new(10).enabled());
        assert!(!Channel::new(0).enabled());
        assert_eq!(Channel::disabled(), Channel::new(0));
    }

    #[test]
    fn test_credit_rates_defaults_and_sanitizing() {
        let rates = CreditRates::default();
        assert_eq!(rates.sms, 1.0);
        assert_eq!(rates.email, 0.1);
        assert_eq!(rates.push, 0.05);

        let rates = CreditRates::new(-2.0, f64::NAN, 0.5);
        assert_eq!(rates.sms, 0.0);
        assert_eq!(rates.email, 0.0);
        assert_eq!(rates.push, 0.5);
    }

    #[test]
    fn test_update_merges_only_touched_channels() {
        let channels = Channels::with_audiences(100, 200, 0);
        let update = MessageTypeUpdate::new()
            .audience(ChannelKind::Email, 0)
            .audience(ChannelKind::Push, 50);

        let merged = update.merge_channels(&channels);
        assert_eq!(merged.sms().audience_size(), 100);
        assert!(merged.sms().enabled());
        assert!(!merged.email().enabled());
        assert_eq!(merged.push().audience_size(), 50);
        assert!(merged.push().enabled());
    }

    #[test]
    fn test_totals_grand_and_annual() {
        let mut totals = CreditTotals::default();
        totals.add(&ChannelCredits::new(10, 20, 30));
        totals.add(&ChannelCredits::new(1, 2, 3));
        assert_eq!(totals.sms(), 11);
        assert_eq!(totals.grand(), 66);
        assert_eq!(totals.annual(), 792);
    }

    #[test]
    fn test_totals_saturate_instead_of_overflowing() {
        let huge = ChannelCredits::new(u64::MAX, u64::MAX, 0);
        assert_eq!(huge.total(), u64::MAX);

        let mut totals = CreditTotals::default();
        totals.add(&huge);
        totals.add(&ChannelCredits::new(1, 1, 1));
        assert_eq!(totals.sms(), u64::MAX);
        assert_eq!(totals.push(), 1);
        assert_eq!(totals.grand(), u64::MAX);
        assert_eq!(totals.annual(), u64::MAX);

        let annual_only = CreditTotals::new(u64::MAX / 2, 0, 0);
        assert_eq!(annual_only.annual(), u64::MAX);
    }
}
