// Copyright(C) Mundis.
pub mod keytool_commands;
pub mod main_commands;
pub mod wallet_commands;
