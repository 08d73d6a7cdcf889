//! Command handlers for atriumctl

use crate::client::PortalClient;
use crate::display;
use anyhow::{bail, Result};
use atrium_common::contacts::BuildingContact;
use atrium_common::types::{
    Announcement, MaintenanceTicket, RegisteredTenant, TenantProfile, TenantRegistration,
    TicketStatus,
};
use owo_colors::OwoColorize;
use serde_json::json;

pub async fn status(client: &PortalClient) -> Result<()> {
    let health: serde_json::Value = client.get_json("/v1/health").await?;
    println!(
        "atriumd v{}  {}  up {}s",
        health["version"].as_str().unwrap_or("?"),
        health["status"].as_str().unwrap_or("?").green(),
        health["uptime_seconds"].as_u64().unwrap_or(0)
    );
    Ok(())
}

pub async fn register(
    client: &PortalClient,
    email: String,
    first_name: String,
    last_name: String,
    unit: String,
    building: String,
    phone: Option<String>,
) -> Result<()> {
    let registration = TenantRegistration {
        email,
        first_name,
        last_name,
        unit_number: unit,
        building,
        phone,
        emergency_contact_name: None,
        emergency_contact_phone: None,
        move_in_date: None,
        lease_end_date: None,
    };
    let tenant: RegisteredTenant = client.post_json("/v1/tenants", &registration).await?;
    println!(
        "Registered {} {} (unit {}, id {})",
        tenant.registration.first_name,
        tenant.registration.last_name,
        tenant.registration.unit_number,
        tenant.id
    );
    Ok(())
}

pub async fn login(client: &PortalClient, email: String, unit: String) -> Result<()> {
    let profile: TenantProfile = client
        .post_json("/v1/session", &json!({ "email": email, "unitNumber": unit }))
        .await?;
    println!(
        "Signed in as {} {} ({}, floor {})",
        profile.first_name, profile.last_name, profile.unit_no, profile.floor
    );
    Ok(())
}

pub struct SubmitArgs {
    pub request_type: String,
    pub category: String,
    pub title: String,
    pub description: String,
    pub floor: i32,
    pub unit: String,
    pub property: String,
    pub building: Option<String>,
    pub phone: String,
    pub photos: Vec<String>,
}

pub async fn submit(client: &PortalClient, args: SubmitArgs) -> Result<()> {
    let payload = json!({
        "property": args.property,
        "building": args.building,
        "floor": args.floor,
        "unit": args.unit,
        "requestType": args.request_type,
        "category": args.category,
        "title": args.title,
        "description": args.description,
        "contactPhone": args.phone,
        "photos": args.photos,
    });
    let ticket: MaintenanceTicket = client.post_json("/v1/requests", &payload).await?;
    println!(
        "Ticket {} opened with priority {}",
        ticket.ticket_id.bold(),
        display::priority_badge(ticket.priority)
    );
    println!("Reference: {}", ticket.hash_id);
    Ok(())
}

pub async fn list(client: &PortalClient) -> Result<()> {
    let tickets: Vec<MaintenanceTicket> = client.get_json("/v1/requests").await?;
    if tickets.is_empty() {
        println!("No tickets yet.");
        return Ok(());
    }
    for ticket in &tickets {
        println!("{}", display::ticket_line(ticket));
    }
    println!("\n{} ticket(s)", tickets.len());
    Ok(())
}

pub async fn set_status(client: &PortalClient, ticket: String, status: String) -> Result<()> {
    let status = match status.as_str() {
        "Open" => TicketStatus::Open,
        "Assigned" => TicketStatus::Assigned,
        "Resolved" => TicketStatus::Resolved,
        other => bail!(
            "Invalid status '{}'. Valid values: Open, Assigned, Resolved",
            other
        ),
    };
    let updated: MaintenanceTicket = client
        .post_json(
            "/v1/requests/status",
            &json!({ "ticketId": ticket, "status": status }),
        )
        .await?;
    println!(
        "Ticket {} is now {}",
        updated.ticket_id,
        display::status_label(updated.status)
    );
    Ok(())
}

pub async fn announcements(client: &PortalClient) -> Result<()> {
    let announcements: Vec<Announcement> = client.get_json("/v1/announcements").await?;
    for a in &announcements {
        println!(
            "[{}] {} ({} - {})",
            display::priority_badge(a.priority),
            a.title.bold(),
            a.effective_date,
            a.end_date
        );
        println!("    {}", a.body);
        for attachment in &a.attachments {
            println!("    attachment: {}", attachment);
        }
        println!();
    }
    Ok(())
}

pub async fn contacts(client: &PortalClient) -> Result<()> {
    let directory: Vec<BuildingContact> = client.get_json("/v1/contacts").await?;
    for contact in &directory {
        let name = if contact.is_emergency {
            format!("{}", contact.name.red().bold())
        } else {
            format!("{}", contact.name.bold())
        };
        println!("{}  {}  ({})", name, contact.phone, contact.hours);
        println!("    {}", contact.role);
    }
    Ok(())
}

pub async fn chat(client: &PortalClient, message: String) -> Result<()> {
    let reply: serde_json::Value = client
        .post_json("/v1/chat", &json!({ "message": message }))
        .await?;
    println!("{}", reply["message"].as_str().unwrap_or(""));
    Ok(())
}

pub async fn export(client: &PortalClient, what: String, out: Option<String>) -> Result<()> {
    let (path, default_name) = match what.as_str() {
        "tenants" => ("/v1/export/tenants", "tenants"),
        "requests" => ("/v1/export/requests", "requests"),
        other => bail!("Unknown export '{}'. Valid values: tenants, requests", other),
    };

    let csv = client.get_text(path).await?;
    let filename =
        out.unwrap_or_else(|| atrium_common::csv_export::dated_filename(default_name));
    std::fs::write(&filename, &csv)?;
    println!("Wrote {} ({} bytes)", filename, csv.len());
    Ok(())
}
