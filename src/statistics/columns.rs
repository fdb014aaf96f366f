//! Statistics table columns

use serde_json::Value;

use crate::api::StatisticsRecord;

/// One column of the statistics table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatisticsColumn {
    CaptureTime,
    ActiveUsers,
    ActiveDevices,
    Requests,
    MessagesReceived,
    MessagesStored,
    MailSent,
    SmsSent,
    GeocoderRequests,
    GeolocationRequests,
}

/// Every selectable column, in menu order
pub const ALL_COLUMNS: [StatisticsColumn; 10] = [
    StatisticsColumn::CaptureTime,
    StatisticsColumn::ActiveUsers,
    StatisticsColumn::ActiveDevices,
    StatisticsColumn::Requests,
    StatisticsColumn::MessagesReceived,
    StatisticsColumn::MessagesStored,
    StatisticsColumn::MailSent,
    StatisticsColumn::SmsSent,
    StatisticsColumn::GeocoderRequests,
    StatisticsColumn::GeolocationRequests,
];

/// Columns shown before the user picks any
pub const DEFAULT_COLUMNS: [StatisticsColumn; 4] = [
    StatisticsColumn::CaptureTime,
    StatisticsColumn::ActiveUsers,
    StatisticsColumn::ActiveDevices,
    StatisticsColumn::MessagesStored,
];

impl StatisticsColumn {
    /// Wire name of the record field
    pub fn key(self) -> &'static str {
        match self {
            StatisticsColumn::CaptureTime => "captureTime",
            StatisticsColumn::ActiveUsers => "activeUsers",
            StatisticsColumn::ActiveDevices => "activeDevices",
            StatisticsColumn::Requests => "requests",
            StatisticsColumn::MessagesReceived => "messagesReceived",
            StatisticsColumn::MessagesStored => "messagesStored",
            StatisticsColumn::MailSent => "mailSent",
            StatisticsColumn::SmsSent => "smsSent",
            StatisticsColumn::GeocoderRequests => "geocoderRequests",
            StatisticsColumn::GeolocationRequests => "geolocationRequests",
        }
    }

    /// Translation key of the column header
    pub fn label_key(self) -> &'static str {
        match self {
            StatisticsColumn::CaptureTime => "statisticsCaptureTime",
            StatisticsColumn::ActiveUsers => "statisticsActiveUsers",
            StatisticsColumn::ActiveDevices => "statisticsActiveDevices",
            StatisticsColumn::Requests => "statisticsRequests",
            StatisticsColumn::MessagesReceived => "statisticsMessagesReceived",
            StatisticsColumn::MessagesStored => "statisticsMessagesStored",
            StatisticsColumn::MailSent => "notificatorMail",
            StatisticsColumn::SmsSent => "notificatorSms",
            StatisticsColumn::GeocoderRequests => "statisticsGeocoder",
            StatisticsColumn::GeolocationRequests => "statisticsGeolocation",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        ALL_COLUMNS.into_iter().find(|column| column.key() == key)
    }

    /// Raw value of a counter column; `None` for capture time or a
    /// field missing from the payload
    pub fn value(self, record: &StatisticsRecord) -> Option<&Value> {
        let value = match self {
            StatisticsColumn::CaptureTime => return None,
            StatisticsColumn::ActiveUsers => &record.active_users,
            StatisticsColumn::ActiveDevices => &record.active_devices,
            StatisticsColumn::Requests => &record.requests,
            StatisticsColumn::MessagesReceived => &record.messages_received,
            StatisticsColumn::MessagesStored => &record.messages_stored,
            StatisticsColumn::MailSent => &record.mail_sent,
            StatisticsColumn::SmsSent => &record.sms_sent,
            StatisticsColumn::GeocoderRequests => &record.geocoder_requests,
            StatisticsColumn::GeolocationRequests => &record.geolocation_requests,
        };
        value.as_ref()
    }
}

/// Ordered set of selected columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSelection {
    columns: Vec<StatisticsColumn>,
}

impl Default for ColumnSelection {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS.to_vec(),
        }
    }
}

impl ColumnSelection {
    /// Builds a selection from persisted keys, skipping unknown keys and
    /// repeats
    pub fn from_keys<S: AsRef<str>>(keys: &[S]) -> Self {
        let mut columns = Vec::with_capacity(keys.len());
        for column in keys.iter().filter_map(|key| StatisticsColumn::from_key(key.as_ref())) {
            if !columns.contains(&column) {
                columns.push(column);
            }
        }
        Self { columns }
    }

    /// Keys in display order, as persisted
    pub fn keys(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.key().to_string()).collect()
    }

    pub fn columns(&self) -> &[StatisticsColumn] {
        &self.columns
    }

    pub fn contains(&self, column: StatisticsColumn) -> bool {
        self.columns.contains(&column)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Removes the column if selected, otherwise appends it
    pub fn toggle(&mut self, column: StatisticsColumn) {
        match self.columns.iter().position(|c| *c == column) {
            Some(index) => {
                self.columns.remove(index);
            }
            None => self.columns.push(column),
        }
    }
}
