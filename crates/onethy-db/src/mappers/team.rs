//! Team entity <-> model mapper

use onethy_core::entities::{Team, TeamMember};
use onethy_core::Snowflake;

use crate::models::{TeamMemberModel, TeamModel};

impl From<TeamModel> for Team {
    fn from(model: TeamModel) -> Self {
        Team {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            name: model.name,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<TeamMemberModel> for TeamMember {
    fn from(model: TeamMemberModel) -> Self {
        TeamMember {
            team_id: Snowflake::new(model.team_id),
            agent_id: Snowflake::new(model.agent_id),
            joined_at: model.joined_at,
        }
    }
}
