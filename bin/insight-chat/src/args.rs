// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "insight-chat", about = "Chat client for the sales insights backend")]
pub struct Args {
    /// Base URL of the backend serving POST /api/chat
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    pub backend_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn backend_url_defaults_and_overrides() -> Result<()> {
        let args = Args::try_parse_from(["insight-chat"])?;
        assert_eq!(args.backend_url, "http://127.0.0.1:8000");

        let args =
            Args::try_parse_from(["insight-chat", "--backend-url", "http://localhost:9999"])?;
        assert_eq!(args.backend_url, "http://localhost:9999");
        Ok(())
    }
}
