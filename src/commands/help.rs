pub fn execute() -> String {
    [
        "📖 TradeBlade Commands",
        "",
        "🪟 Modals",
        "  $open <menu|login|register>        Open a modal",
        "  $close <modal>                     Press a modal's close button",
        "  $click <modal> backdrop|content    Click inside a modal container",
        "  $key escape                        Close every open modal",
        "  $switch login|register             Swap between sign-in and sign-up",
        "",
        "💳 Tariffs",
        "  $period <plan> <months>            Change a plan card's billing period",
        "  $plan <standart|vip>               Buy a plan (opens the summary)",
        "  $summary_period <months>           Change the period inside the summary",
        "  $buy <email>                       Confirm the purchase",
        "",
        "✉️ Forms",
        "  $subscribe <email>                 Leave an email for a callback",
        "  $try [email]                       Claim the free trial",
        "  $login <email> <password>          Sign in (login modal must be open)",
        "  $register <email> <pw> <confirm>   Sign up (register modal must be open)",
        "",
        "📊 Page",
        "  $show [deals|tariffs|summary|modals]",
        "  $help",
    ]
    .join("\n")
}
