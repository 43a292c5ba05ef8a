//! Group commands: create, list, show, invite, members.

use marquee_core::{Caller, MarqueeService};

use super::parse_group_id;

pub async fn cmd_group_create(
    svc: &MarqueeService,
    caller: &Caller,
    name: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let group_id = svc.create_group(caller, &name).await?;

    println!("✓ Created group: {name}");
    println!("  ID: {}", group_id.0);
    Ok(())
}

pub async fn cmd_group_list(
    svc: &MarqueeService,
    caller: &Caller,
) -> Result<(), Box<dyn std::error::Error>> {
    let groups = svc.list_my_groups(caller).await?;

    if groups.is_empty() {
        println!("No groups found");
        return Ok(());
    }

    for group in groups {
        println!("{} ({})", group.name, group.my_role.as_str());
        println!("  ID: {}", group.id.0);
        let roster: Vec<String> = group
            .members
            .iter()
            .map(|m| format!("{} ({})", m.display_name, m.role.as_str()))
            .collect();
        println!("  Members: {}", roster.join(", "));
    }
    Ok(())
}

pub async fn cmd_group_show(
    svc: &MarqueeService,
    caller: &Caller,
    group: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let group_id = parse_group_id(group)?;
    let info = svc.get_group(caller, &group_id).await?;

    println!("{}", info.name);
    println!("  ID: {}", info.id.0);
    println!("  Your role: {}", info.my_role.as_str());
    Ok(())
}

pub async fn cmd_group_invite(
    svc: &MarqueeService,
    caller: &Caller,
    group: &str,
    email: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let group_id = parse_group_id(group)?;
    svc.invite(caller, &group_id, &email).await?;

    println!("✓ Invited {email}");
    Ok(())
}

pub async fn cmd_group_members(
    svc: &MarqueeService,
    caller: &Caller,
    group: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let group_id = parse_group_id(group)?;
    let members = svc.list_group_members(caller, &group_id).await?;

    for member in members {
        println!("{} ({})", member.display_name, member.role.as_str());
        println!("  ID: {}", member.user_id.0);
    }
    Ok(())
}
