use insta::assert_snapshot;
use mcpack_codegen::{BuildOptions, Datapack, Function};
use mcpack_commands::{
    EntitySelector, Execute, ScoreAllocator, Scoreboard, ScoreboardTag, Tellraw, TextComponent,
};
use mcpack_common::{IdPrefix, Identifier};

fn pack() -> Datapack {
    Datapack::new(BuildOptions::with_internal(
        IdPrefix::parse("game:internal").unwrap(),
    ))
}

#[test]
fn test_execute_run_keeps_function_reference() {
    let mut pack = pack();
    let points = Scoreboard::new("points").unwrap();
    let reward = Function::with_commands(
        "reward",
        [points.entities(EntitySelector::executor()).add(10)],
    );
    let winner = ScoreboardTag::new("winner");
    let everyone = EntitySelector::all_players().has_tag(&winner).unwrap();

    pack.function(
        Identifier::parse("game:end_round").unwrap(),
        [
            Execute::new().as_(&everyone).run(reward.run()),
            winner.remove(&EntitySelector::all_players()),
        ],
    )
    .unwrap();

    let output = pack.build().unwrap();
    assert_snapshot!(output.files["data/game/functions/end_round.mcfunction"], @r"
    execute as @a[tag=winner] run scoreboard players add @s points 10
    tag @a remove winner
    ");
    assert_eq!(output.files.len(), 1);
}

#[test]
fn test_allocator_constants_go_into_load() {
    let mut pack = pack();
    let vars = Scoreboard::new("vars").unwrap();
    let mut alloc = ScoreAllocator::new(vars.clone());
    let tmp = alloc.score();
    let ten = alloc.constant(10);

    pack.function(
        Identifier::parse("game:math").unwrap(),
        [tmp.set(42), tmp.divide_score(&ten)],
    )
    .unwrap();
    let mut init = vec![vars.create().unwrap()];
    init.extend(alloc.init_constants().iter().cloned());
    let load = pack
        .function(Identifier::parse("game:init").unwrap(), init)
        .unwrap();
    pack.add_on_load(&load);

    let output = pack.build().unwrap();
    assert_snapshot!(output.files["data/game/functions/init.mcfunction"], @r"
    scoreboard objectives add vars dummy
    scoreboard players set C_10 vars 10
    ");
    assert_snapshot!(output.files["data/game/functions/math.mcfunction"], @r"
    scoreboard players set A_0 vars 42
    scoreboard players operation A_0 vars /= C_10 vars
    ");
}

#[test]
fn test_tellraw_in_tick_function() {
    let mut pack = pack();
    let hud = Function::with_commands(
        "showHud",
        [Tellraw::new(EntitySelector::all_players(), TextComponent::plain("tick"))
            .to_command()
            .unwrap()],
    );
    hud.set_on_tick(true);
    pack.function(Identifier::parse("game:start").unwrap(), [hud.run(), hud.run()])
        .unwrap();

    let output = pack.build().unwrap();
    assert_snapshot!(output.files["data/game/functions/internal/show_hud.mcfunction"], @r#"tellraw @a {"text":"tick"}"#);
    assert_snapshot!(output.files["data/minecraft/tags/functions/tick.json"], @r#"{"replace":false,"values":["game:internal/show_hud"]}"#);
}
