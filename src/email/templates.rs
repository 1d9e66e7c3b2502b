use std::collections::HashMap;

use super::template::render;
use super::OutgoingEmail;
use crate::config::SiteConfig;
use crate::submission::Row;

const REGISTRATION_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h1>Registration Confirmation</h1>
    <p>Hello {{name}},</p>
    <p>Thank you for registering for <strong>{{eventName}}</strong>. Your registration has been confirmed.</p>
    <div style="background-color: #f9f9f9; padding: 15px; border-radius: 5px; margin-bottom: 20px;">
        <p><strong>Event:</strong> {{eventName}}</p>
        <p><strong>Date:</strong> {{eventDate}}</p>
        <p><strong>Time:</strong> {{eventTime}}</p>
        <p><strong>Location:</strong> {{eventLocation}}</p>
        <p><strong>Registration ID:</strong> {{registrationId}}</p>
    </div>
    {{{hallTicket}}}
    <div style="margin-top: 30px; padding-top: 20px; border-top: 1px solid #eee; color: #666; font-size: 12px;">
        <p>This is an automated email. Please do not reply.</p>
        <p>&copy; {{siteName}} Community. All rights reserved.</p>
    </div>
</body>
</html>"#;

const HALL_TICKET_HTML: &str = r#"<div style="text-align: center; margin: 20px 0;">
        <p><strong>Your QR Code Hall Ticket</strong></p>
        <p>Please present this QR code at the event entrance</p>
        <img src="{{qrDataUrl}}" alt="QR Code" style="width: 200px; height: 200px;"/>
    </div>"#;

const RECRUITMENT_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="margin: 0; padding: 20px; background-color: #f3f4f6;">
    <div style="max-width: 600px; margin: 0 auto; background-color: #ffffff; border-radius: 16px; padding: 40px 30px; border: 1px solid #e5e7eb; font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; color: #1f2937;">
        <h1 style="color: #0f62fe; font-size: 30px; margin: 0; text-align: center;">Application Received!</h1>
        <p>Hi <strong>{{fullName}}</strong>,</p>
        <p style="line-height: 1.6;">We're thrilled that you want to be a part of <strong style="color: #0f62fe;">{{siteName}}</strong>! Your application for the <strong style="color: #0f62fe;">{{roleName}}</strong> role has been successfully received.</p>
        <p style="line-height: 1.6;">Your application ID is <strong>{{applicationId}}</strong>. Our team is reviewing all submissions and will reach out shortly with the next steps.</p>
        <p style="text-align: center; padding: 20px 0;"><a href="{{siteUrl}}" style="background-color: #0f62fe; color: white; padding: 14px 28px; text-decoration: none; border-radius: 8px; display: inline-block;">Visit {{siteName}} Website</a></p>
        <p style="font-size: 14px; color: #6b7280;">Warm regards,<br><strong>The {{siteName}} Team</strong></p>
    </div>
</body>
</html>"#;

pub fn registration_confirmation(
    site: &SiteConfig,
    row: &Row,
    qr_data_url: Option<&str>,
) -> OutgoingEmail {
    let mut vars = row_vars(row);
    vars.insert("siteName".into(), site.name.clone());

    let hall_ticket = match qr_data_url {
        Some(url) => {
            let ticket_vars = HashMap::from([("qrDataUrl".to_string(), url.to_string())]);
            render(HALL_TICKET_HTML, &ticket_vars)
        }
        None => String::new(),
    };
    vars.insert("hallTicket".into(), hall_ticket);

    OutgoingEmail {
        to: row.text("email"),
        subject: format!("Registration Confirmation for {}", row.text("eventName")),
        html: render(REGISTRATION_HTML, &vars),
    }
}

pub fn recruitment_confirmation(site: &SiteConfig, row: &Row, role_name: &str) -> OutgoingEmail {
    let mut vars = row_vars(row);
    vars.insert("siteName".into(), site.name.clone());
    vars.insert("siteUrl".into(), site.url.clone());
    vars.insert("roleName".into(), role_name.to_string());

    OutgoingEmail {
        to: row.text("email"),
        subject: format!("{} Team Application Received", site.name),
        html: render(RECRUITMENT_HTML, &vars),
    }
}

fn row_vars(row: &Row) -> HashMap<String, String> {
    row.columns
        .keys()
        .map(|column| (column.clone(), row.text(column)))
        .collect()
}
