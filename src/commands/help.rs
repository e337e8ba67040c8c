use crate::config::Config;

pub fn text(config: &Config) -> String {
    format!(
        "📖 PayFi Hub commands ({network}, {symbol})\n\
         \n\
         Wallet\n  \
           connect                              Connect and switch to {network}\n  \
           disconnect                           Forget the connected account\n  \
           status                               Show the session\n\
         \n\
         Payments\n  \
           tip <address> <amount> [message]     Send a tip\n  \
           recipient add <address> [name]       Add a bill split recipient\n  \
           recipient remove <number>            Remove a recipient\n  \
           recipient list [total]               Show recipients and each share\n  \
           recipient clear                      Empty the recipient list\n  \
           split <total>                        Pay every recipient an equal share\n  \
           subscribe <amount> <freq> <address>  Schedule a recurring payment (not executed)\n  \
           subscriptions                        List schedules\n  \
           contribute <amount>                  Fund \"{campaign}\"\n  \
           campaign                             Show campaign progress\n  \
           buy <item> <price>                   Pay the campus treasury\n\
         \n\
         Records\n  \
           history [page]                       Recent transactions, 10 per page\n  \
           stats                                Volume, count and average\n\
         \n\
         help | quit",
        network = config.chain.name,
        symbol = config.chain.currency_symbol,
        campaign = config.campaign_name,
    )
}
