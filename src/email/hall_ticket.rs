use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use qrcode::render::svg;
use qrcode::QrCode;
use serde::Serialize;

/// What the door staff's scanner reads off the hall ticket.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HallTicket {
    pub registration_id: String,
    pub name: String,
    pub event_name: String,
    pub event_date: String,
    pub event_time: String,
}

impl HallTicket {
    /// Render the ticket as a QR code inside a `data:` URL for `<img src>`.
    pub fn to_data_url(&self) -> Result<String, String> {
        let payload =
            serde_json::to_string(self).map_err(|e| format!("Hall ticket encoding failed: {e}"))?;

        let code =
            QrCode::new(payload.as_bytes()).map_err(|e| format!("QR generation failed: {e}"))?;

        let svg_string = code
            .render::<svg::Color>()
            .min_dimensions(200, 200)
            .dark_color(svg::Color("#000000"))
            .light_color(svg::Color("#ffffff"))
            .quiet_zone(true)
            .build();

        Ok(format!(
            "data:image/svg+xml;base64,{}",
            STANDARD.encode(svg_string)
        ))
    }
}
