use crate::{cli::SetOnlineModeArgs, error::Result, structs::server::{OnlineMode, Server}};

pub fn get_online_mode(server: &Server) -> Result<()> {
    println!("server is currently running in {} mode", server.online_mode()?);
    Ok(())
}

pub fn set_online_mode(mut server: Server, args: SetOnlineModeArgs) -> Result<()> {
    server.properties.set_online_mode(OnlineMode::from(args.online_mode));
    server.properties.write()?;
    println!("Set online-mode to {}", args.online_mode);
    Ok(())
}
